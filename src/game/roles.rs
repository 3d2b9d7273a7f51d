//! 身份分配：6 号座位固定女巫，其余 8 个身份均匀洗牌后按座位顺序填入

use rand::seq::SliceRandom;
use rand::Rng;

use crate::game::{Role, Seat, SEAT_COUNT};

/// 标准九人局身份池：3 民、1 猎人、1 预言家、3 狼、1 女巫
pub const ROLE_POOL: [Role; SEAT_COUNT] = [
    Role::Villager,
    Role::Villager,
    Role::Villager,
    Role::Hunter,
    Role::Seer,
    Role::Wolf,
    Role::Wolf,
    Role::Wolf,
    Role::Witch,
];

pub struct RoleAssigner;

impl RoleAssigner {
    /// 为新对局生成身份表（下标 0 对应 1 号座位）。每局都应重新调用。
    pub fn assign<R: Rng + ?Sized>(rng: &mut R) -> [Role; SEAT_COUNT] {
        let mut rest: Vec<Role> = ROLE_POOL.to_vec();
        if let Some(pos) = rest.iter().position(|r| *r == Role::Witch) {
            rest.remove(pos);
        }
        rest.shuffle(rng);

        let mut rest = rest.into_iter();
        let mut roles = [Role::Villager; SEAT_COUNT];
        for seat in Seat::all() {
            roles[seat.index()] = if seat.is_human() {
                Role::Witch
            } else {
                rest.next().unwrap_or(Role::Villager)
            };
        }
        roles
    }
}
