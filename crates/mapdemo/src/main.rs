use std::time::Instant;

use actors::ticker;
use mapdemo::{
    command::Command,
    controller::{GetUiState, MapEventMessage, Tick},
    Controller, DemoConfig,
};
use overlay::{recording::RecordingSurface, MapEvent};
use tokio::io::{stdin, AsyncBufReadExt, BufReader};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    // config
    let config = DemoConfig::from_env().expect("could not read demo config.");
    let tick_interval = config.tick_interval;

    // controller
    let controller = Controller::new(config, RecordingSurface::logging(), Instant::now())
        .expect("could not set up the demo.");
    let controller = actors::run_unsupervised(controller);
    let ticker = ticker::every(controller.clone(), tick_interval, Tick);

    // the recording surface is ready right away
    controller
        .tell(MapEventMessage::now(MapEvent::Initialized))
        .await
        .unwrap();

    let mut lines = BufReader::new(stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(why) => {
                log::warn!("{}", why);
                continue;
            }
        };
        let result = match command {
            Command::Quit => break,
            Command::State => controller.ask(GetUiState).await.map(|state| {
                match serde_json::to_string_pretty(&state) {
                    Ok(json) => println!("{}", json),
                    Err(why) => log::error!("can not print state: {}", why),
                }
                Ok(())
            }),
            Command::Ui(command) => controller.ask(command).await,
            Command::Map(event) => controller.ask(MapEventMessage::now(event)).await,
        };
        if let Err(why) = result {
            log::error!("controller is gone: {}", why);
            break;
        }
    }

    ticker.abort();
}
