pub mod app;
pub mod key_binds;
pub mod localize;
pub mod message;
pub mod watcher;

use app::WatchPgm;

fn main() -> cosmic::iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = viewer_config::config();

    let settings = cosmic::app::Settings::default()
        .size(cosmic::iced::Size::new(
            config.window_width,
            config.window_height,
        ))
        .size_limits(
            cosmic::iced::Limits::NONE
                .min_width(config.min_width)
                .min_height(config.min_height),
        );

    cosmic::app::run::<WatchPgm>(settings, config)
}
