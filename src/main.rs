//! Werewolf - 控制台对局
//!
//! 入口：加载配置、初始化日志、启动对局宿主；stdin 读入人类玩家（6 号女巫）的命令，stdout 输出对局事件。

use std::path::PathBuf;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use werewolf::config::{load_config, AppConfig};
use werewolf::console::{parse_line, render};
use werewolf::core::{create_game, Command, GameHandle};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let (cfg, config_error) = match load_config(config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    werewolf::observability::init(&cfg.log.level);
    if let Some(e) = config_error {
        tracing::warn!("Config load failed ({}), using defaults", e);
    }

    let GameHandle {
        commands,
        mut events,
        shutdown,
        task,
        ..
    } = create_game(&cfg);

    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => println!("{}", render(&event)),
                Err(RecvError::Lagged(n)) => tracing::warn!("Console fell behind, {} events dropped", n),
                Err(RecvError::Closed) => break,
            }
        }
    });

    println!("Commands: start | heal [yes|no] | poison <seat>|none | say <text> | draft | vote <seat> | done | quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received Ctrl+C, shutting down");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                match parse_line(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(cmd)) => {
                        if commands.send(cmd).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => eprintln!("{}", e),
                }
            }
        }
    }

    shutdown.cancel();
    task.await.context("Game host task failed")?;
    Ok(())
}
