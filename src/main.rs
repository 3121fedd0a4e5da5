//! dolphin-probe: hook a running Dolphin and report the located RAM

use anyhow::Result;
use dolphin_memaccess::Config;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = Config::load_or_default("dolphin-memaccess.toml");

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(false)
        .init();

    run(config)
}

#[cfg(not(target_os = "macos"))]
fn run(_config: Config) -> Result<()> {
    anyhow::bail!("dolphin-probe only supports macOS hosts");
}

#[cfg(target_os = "macos")]
fn run(mut config: Config) -> Result<()> {
    use dolphin_memaccess::{Address, MemoryAccessor};
    use tracing::{info, warn};

    config.process = config.process.with_env_override();
    let aram_fake_size = config.layout.aram_fake_size;

    let mut accessor = MemoryAccessor::new(config);

    let pid = accessor.find_pid()?;
    info!(pid, "found emulator process");

    if !accessor.attach_and_locate()? {
        warn!("emulated RAM not located; is a game running?");
        return Ok(());
    }

    let geometry = *accessor.geometry();
    info!(
        primary = %Address::new(geometry.primary_start),
        "primary pool located"
    );
    if geometry.auxiliary_accessible {
        info!(
            auxiliary = %Address::new(geometry.auxiliary_start),
            "auxiliary pool accessible"
        );
    }
    if geometry.extended_present {
        info!(
            extended = %Address::new(geometry.extended_start),
            distance = format_args!("{:#x}", geometry.primary_to_extended_distance()),
            "extended pool present"
        );
    }

    // The game ID lives at the start of the primary pool; with the
    // auxiliary pool accessible, offsets below the fake-size boundary
    // address the auxiliary pool instead
    let id_offset = if geometry.auxiliary_accessible {
        aram_fake_size
    } else {
        0
    };
    let game_id = accessor.read_ram(id_offset, 6, false)?;
    info!(id = %String::from_utf8_lossy(&game_id), "game id");

    accessor.detach();
    Ok(())
}
