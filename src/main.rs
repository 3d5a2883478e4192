// xdo – command-line front-end for the libxdo2 bindings.
// Typing: libxdo via the crate's safe wrapper (X11)
// Settings: ~/.config/xdo/config.ini

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use configparser::ini::Ini;
use directories::BaseDirs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use xdo::{Button, Window, Xdo, DEFAULT_KEY_DELAY};

const APP_NAME: &str = "xdo";
const DEFAULT_WAIT_SECS: u64 = 3;
const MAX_WAIT_SECS: u64 = 86_400;

#[derive(Parser, Debug)]
#[command(name = "xdo")]
#[command(about = "Simulate keyboard and mouse input and manipulate windows via libxdo", long_about = None)]
struct Cli {
    /// X display to connect to (defaults to $DISPLAY)
    #[arg(long, global = true)]
    display: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Type text after a countdown, so you can focus the target window first
    Type {
        text: String,
        /// Seconds to wait before typing starts (remembered for next time)
        #[arg(short, long)]
        wait: Option<u64>,
        /// Delay between keystrokes, in microseconds (remembered for next time)
        #[arg(short, long)]
        delay: Option<u64>,
        /// Target window id (defaults to the focused window)
        #[arg(long)]
        window: Option<u64>,
    },
    /// Press and release a key sequence, e.g. ctrl+alt+t
    Key {
        sequence: String,
        /// Delay between keystrokes, in microseconds
        #[arg(short, long)]
        delay: Option<u64>,
        #[arg(long)]
        window: Option<u64>,
    },
    /// Press (and hold) a key sequence
    Keydown {
        sequence: String,
        #[arg(short, long)]
        delay: Option<u64>,
        #[arg(long)]
        window: Option<u64>,
    },
    /// Release a held key sequence
    Keyup {
        sequence: String,
        #[arg(short, long)]
        delay: Option<u64>,
        #[arg(long)]
        window: Option<u64>,
    },
    /// Click a mouse button (1=left, 2=middle, 3=right, 4/5=scroll)
    Click {
        button: i32,
        #[arg(long)]
        window: Option<u64>,
    },
    /// Press a mouse button without releasing it
    Mousedown {
        button: i32,
        #[arg(long)]
        window: Option<u64>,
    },
    /// Release a held mouse button
    Mouseup {
        button: i32,
        #[arg(long)]
        window: Option<u64>,
    },
    /// Move the pointer: absolute by default, or relative to a window/itself
    #[command(allow_negative_numbers = true)]
    Mousemove {
        x: i32,
        y: i32,
        /// Screen for absolute moves
        #[arg(long, default_value_t = 0, conflicts_with_all = ["window", "relative"])]
        screen: i32,
        /// Interpret x,y relative to this window's origin
        #[arg(long, conflicts_with = "relative")]
        window: Option<u64>,
        /// Interpret x,y relative to the current pointer position
        #[arg(long)]
        relative: bool,
    },
    /// Print the pointer position as "x y screen"
    Mouselocation,
    /// Move a window's top-left corner to x,y
    #[command(allow_negative_numbers = true)]
    Windowmove { window: u64, x: i32, y: i32 },
    /// Resize a window, in pixels
    Windowsize { window: u64, width: i32, height: i32 },
    /// Give a window input focus
    Windowfocus { window: u64 },
    /// Raise a window to the top of the stacking order
    Windowraise { window: u64 },
    /// Activate a window (switch desktop, raise, focus)
    Windowactivate { window: u64 },
    /// Print the libxdo version
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Settings {
    wait_secs: u64,
    key_delay_us: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            wait_secs: DEFAULT_WAIT_SECS,
            key_delay_us: DEFAULT_KEY_DELAY.as_micros() as u64,
        }
    }
}

fn config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|base| base.config_dir().join(APP_NAME).join("config.ini"))
}

fn load_settings_from(path: &Path) -> Settings {
    let defaults = Settings::default();
    let mut conf = Ini::new();
    if conf.load(path).is_err() {
        return defaults;
    }
    // Anything missing or unparsable falls back to the built-in default.
    Settings {
        wait_secs: conf
            .get("settings", "wait_seconds")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.wait_secs),
        key_delay_us: conf
            .get("settings", "key_delay_us")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.key_delay_us),
    }
}

fn save_settings_to(path: &Path, settings: Settings) {
    let mut conf = Ini::new();
    conf.set(
        "settings",
        "wait_seconds",
        Some(settings.wait_secs.to_string()),
    );
    conf.set(
        "settings",
        "key_delay_us",
        Some(settings.key_delay_us.to_string()),
    );

    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = conf.write(path) {
        debug!("could not save settings to {}: {}", path.display(), e);
    }
}

fn load_settings() -> Settings {
    config_path()
        .map(|path| load_settings_from(&path))
        .unwrap_or_default()
}

fn save_settings(settings: Settings) {
    if let Some(path) = config_path() {
        save_settings_to(&path, settings);
    }
}

fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("xdo=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("xdo=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn target(window: Option<u64>) -> Window {
    window.map(Window).unwrap_or(Window::CURRENT)
}

fn countdown(secs: u64) {
    let mut remaining = secs;
    while remaining > 0 {
        info!(
            "Typing in {} second{}... focus the target window.",
            remaining,
            if remaining == 1 { "" } else { "s" }
        );
        thread::sleep(Duration::from_secs(1));
        remaining -= 1;
    }
}

fn open_session(display: Option<&str>) -> Result<Xdo> {
    match display {
        Some(name) => {
            Xdo::with_display(name).with_context(|| format!("could not open display {name}"))
        }
        None => Xdo::new().context("could not open the default display (is $DISPLAY set?)"),
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Command::Version = cli.command {
        // No session needed; the version string is static.
        println!("{}", xdo::version());
        return Ok(());
    }

    let xdo = open_session(cli.display.as_deref())?;
    let settings = load_settings();
    let key_delay = |us: Option<u64>| Duration::from_micros(us.unwrap_or(settings.key_delay_us));

    match cli.command {
        Command::Type {
            text,
            wait,
            delay,
            window,
        } => {
            let wait = wait.unwrap_or(settings.wait_secs);
            ensure!(
                wait <= MAX_WAIT_SECS,
                "invalid wait (must be a number from 0–86400 seconds)"
            );
            let delay = delay.unwrap_or(settings.key_delay_us);

            countdown(wait);
            xdo.enter_text(target(window), &text, Duration::from_micros(delay))?;
            info!("Done typing.");

            save_settings(Settings {
                wait_secs: wait,
                key_delay_us: delay,
            });
        }
        Command::Key {
            sequence,
            delay,
            window,
        } => xdo.send_keysequence(target(window), &sequence, key_delay(delay))?,
        Command::Keydown {
            sequence,
            delay,
            window,
        } => xdo.send_keysequence_down(target(window), &sequence, key_delay(delay))?,
        Command::Keyup {
            sequence,
            delay,
            window,
        } => xdo.send_keysequence_up(target(window), &sequence, key_delay(delay))?,
        Command::Click { button, window } => xdo.click(target(window), Button::from_code(button))?,
        Command::Mousedown { button, window } => {
            xdo.mouse_down(target(window), Button::from_code(button))?
        }
        Command::Mouseup { button, window } => {
            xdo.mouse_up(target(window), Button::from_code(button))?
        }
        Command::Mousemove {
            x,
            y,
            screen,
            window,
            relative,
        } => {
            if relative {
                xdo.move_mouse_relative(x, y)?;
            } else if let Some(id) = window {
                xdo.move_mouse_relative_to_window(Window(id), x, y)?;
            } else {
                xdo.move_mouse(x, y, screen)?;
            }
        }
        Command::Mouselocation => {
            let loc = xdo.mouse_location()?;
            println!("{} {} {}", loc.x, loc.y, loc.screen);
        }
        Command::Windowmove { window, x, y } => xdo.move_window(Window(window), x, y)?,
        Command::Windowsize {
            window,
            width,
            height,
        } => xdo.set_window_size(Window(window), width, height)?,
        Command::Windowfocus { window } => xdo.focus_window(Window(window))?,
        Command::Windowraise { window } => xdo.raise_window(Window(window))?,
        Command::Windowactivate { window } => xdo.activate_window(Window(window))?,
        Command::Version => unreachable!("handled before opening a session"),
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    debug!(?cli, "parsed arguments");

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn settings_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("xdo").join("config.ini");
        let settings = Settings {
            wait_secs: 7,
            key_delay_us: 4_200,
        };

        save_settings_to(&path, settings);
        assert_eq!(load_settings_from(&path), settings);
    }

    #[test]
    fn missing_config_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let loaded = load_settings_from(&dir.path().join("nope.ini"));
        assert_eq!(loaded, Settings::default());
        assert_eq!(loaded.wait_secs, 3);
        assert_eq!(loaded.key_delay_us, 12_000);
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[settings]\nwait_seconds=soon\nkey_delay_us=9\n").unwrap();

        let loaded = load_settings_from(&path);
        assert_eq!(loaded.wait_secs, Settings::default().wait_secs);
        assert_eq!(loaded.key_delay_us, 9);
    }

    #[test]
    fn type_command_parses_with_options() {
        let cli =
            Cli::try_parse_from(["xdo", "type", "hello world", "--wait", "5", "--delay", "100"])
                .unwrap();
        match cli.command {
            Command::Type {
                text,
                wait,
                delay,
                window,
            } => {
                assert_eq!(text, "hello world");
                assert_eq!(wait, Some(5));
                assert_eq!(delay, Some(100));
                assert_eq!(window, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_display_flag_works_after_subcommand() {
        let cli = Cli::try_parse_from(["xdo", "key", "ctrl+alt+t", "--display", ":1"]).unwrap();
        assert_eq!(cli.display.as_deref(), Some(":1"));
    }

    #[test]
    fn mousemove_rejects_window_combined_with_relative() {
        let err = Cli::try_parse_from([
            "xdo",
            "mousemove",
            "10",
            "20",
            "--window",
            "99",
            "--relative",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn mousemove_defaults_to_screen_zero_absolute() {
        let cli = Cli::try_parse_from(["xdo", "mousemove", "640", "480"]).unwrap();
        match cli.command {
            Command::Mousemove {
                x,
                y,
                screen,
                window,
                relative,
            } => {
                assert_eq!((x, y, screen), (640, 480, 0));
                assert!(window.is_none());
                assert!(!relative);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn missing_window_means_current() {
        assert_eq!(target(None), Window::CURRENT);
        assert_eq!(target(Some(42)), Window(42));
    }
}
