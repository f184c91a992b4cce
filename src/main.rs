// SPDX-License-Identifier: MPL-2.0
use snackmate::app::{self, Flags};
use snackmate::telemetry;

fn main() -> iced::Result {
    let flags = match Flags::parse(pico_args::Arguments::from_env()) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("snackmate: {err}");
            eprintln!(
                "usage: snackmate [--position <anchor>] [--duration <ms>] [--max <n>] \
                 [--config <path>] [--log <filter>]"
            );
            std::process::exit(2);
        }
    };

    if let Err(err) = telemetry::init_tracing(flags.log_filter.as_deref()) {
        eprintln!("snackmate: {err}");
    }

    app::run(flags)
}
