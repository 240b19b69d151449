use color_eyre::Result;
use wiremock_tui::app::App;
use wiremock_tui::config::Config;
use wiremock_tui::logging;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::load()?;
    logging::init(&Config::config_dir()?)?;

    let terminal = ratatui::init();
    let app_result = App::new(config).run(terminal).await;
    ratatui::restore();
    app_result
}
