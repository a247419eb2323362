//! WebShell entry point.
//!
//! With the `gui` feature, opens the shell window on the configured origin.
//! Without it, prints how each URL given on the command line would be
//! handled, without dispatching anything.

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[cfg(feature = "gui")]
fn main() {
    init_logging();
    if let Err(e) = webshell::ui::webview_app::run() {
        log::error!("WebShell failed to start: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
fn main() {
    use webshell::services::navigation_policy::{NavigationPolicy, NavigationPolicyTrait};
    use webshell::types::config::ShellConfig;

    init_logging();

    let config = match ShellConfig::from_build() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid build configuration: {}", e);
            std::process::exit(1);
        }
    };
    let policy = NavigationPolicy::new(&config);

    println!("WebShell v{}", env!("CARGO_PKG_VERSION"));
    println!("  origin:          {}", config.origin_url());
    println!("  pull-to-refresh: {}", config.pull_to_refresh());

    for url in std::env::args().skip(1) {
        let decision = policy.decide(&url);
        if decision.is_allowed() {
            println!("  allow     {}", url);
        } else {
            println!(
                "  external  {} ({:?})",
                url,
                NavigationPolicy::classify_external(&url)
            );
        }
    }
}
