use regwatch_desktop::config::DesktopConfig;

fn main() {
    regwatch_desktop::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let demo_mode = args.iter().any(|arg| arg == "--demo");
    let selected = args
        .iter()
        .position(|arg| arg == "--select")
        .and_then(|i| args.get(i + 1))
        .cloned();

    let config = match DesktopConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(2);
        }
    };

    #[cfg(feature = "tauri-app")]
    if !demo_mode {
        regwatch_desktop::run_tauri(config);
        return;
    }

    let result = if demo_mode {
        regwatch_desktop::run_demo(&config, selected)
    } else {
        regwatch_desktop::run(&config)
    };

    if let Err(err) = result {
        tracing::error!(error = %err, "regwatch backend failed");
        std::process::exit(1);
    }
}
