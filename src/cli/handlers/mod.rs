use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::ConfigError;
use crate::model::{TabConfig, TabItem, TabStripConfig};
use crate::tabs::fit::FitSearch;
use crate::tabs::host::TerminalHost;
use crate::tabs::placement::{FormFactor, Placement};
use crate::tabs::{BarOptions, TabBar};
use crate::tui::render::{buffer_to_string, render_strip};
use crate::tui::theme::Theme;

/// Error type for CLI commands
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid {name}: '{value}'")]
    InvalidArgument { name: &'static str, value: String },
    #[error("cannot select tab {index}: the bar has {len} tabs")]
    SelectionOutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, config: &TabStripConfig) -> Result<(), CliError> {
    let json = cli.json;
    match cli.command {
        Some(Commands::Fit(args)) => cmd_fit(args, config, json),
        Some(Commands::Render(args)) => cmd_render(args, config, json),
        // The TUI is launched from main before dispatch
        None => Ok(()),
    }
}

fn cmd_fit(args: FitArgs, config: &TabStripConfig, json: bool) -> Result<(), CliError> {
    let (mut bar, area) = build_bar(&args.strip, config)?;
    bar.layout(area);
    let fit = FitJson::from_bar(&bar);
    if json {
        println!("{}", serde_json::to_string_pretty(&fit)?);
    } else {
        print!("{}", format_fit_text(&fit));
    }
    Ok(())
}

fn cmd_render(args: RenderArgs, config: &TabStripConfig, json: bool) -> Result<(), CliError> {
    let (bar, area) = build_bar(&args.strip, config)?;
    let text = render_text(bar, area, &Theme::from_config(&config.ui), args.menu)?;
    if json {
        let output = RenderJson {
            width: area.width,
            height: area.height,
            lines: text.lines().map(str::to_string).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", text);
    }
    Ok(())
}

/// Draw `bar` into an off-screen buffer of `area`'s size and return its text.
pub fn render_text(
    mut bar: TabBar<String>,
    area: Rect,
    theme: &Theme,
    open_menu: bool,
) -> Result<String, CliError> {
    if open_menu {
        bar.layout(area);
        bar.open_overflow_menu();
    }
    let mut terminal = Terminal::new(TestBackend::new(area.width, area.height))?;
    terminal.draw(|frame| render_strip(frame, &mut bar, theme, area, 0))?;
    Ok(buffer_to_string(terminal.backend().buffer()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build the bar described by `args` on top of `config`, and the area to lay
/// it out in.
pub fn build_bar(
    args: &StripArgs,
    config: &TabStripConfig,
) -> Result<(TabBar<String>, Rect), CliError> {
    if args.width == 0 {
        return Err(CliError::InvalidArgument {
            name: "width",
            value: args.width.to_string(),
        });
    }
    if args.height == 0 {
        return Err(CliError::InvalidArgument {
            name: "height",
            value: args.height.to_string(),
        });
    }

    let items: Vec<TabItem<String>> = if let Some(n) = args.tabs {
        (1..=n)
            .map(|i| TabItem::new(format!("Tab {}", i), String::new()))
            .collect()
    } else if !args.labels.is_empty() {
        args.labels
            .iter()
            .map(|label| TabItem::new(label.as_str(), String::new()))
            .collect()
    } else {
        config.tabs.iter().map(TabConfig::to_item).collect()
    };

    let mut options = BarOptions::from(config);
    if let Some(placement) = &args.placement {
        options.placement = parse_placement(placement)?;
    }
    if let Some(search) = &args.search {
        options.fit_search = parse_search(search)?;
    }
    if args.no_close {
        options.closable = false;
    }
    if args.no_add {
        options.show_add_button = false;
    }
    let form_factor = if args.compact {
        FormFactor::Compact
    } else {
        config.bar.form_factor
    };

    let len = items.len();
    let mut bar = TabBar::with_options(items, options, TerminalHost::new(form_factor));
    if let Some(index) = args.select {
        if !bar.select_index(index) && bar.selected() != Some(index) {
            return Err(CliError::SelectionOutOfRange { index, len });
        }
    }
    Ok((bar, Rect::new(0, 0, args.width, args.height)))
}

pub fn parse_placement(s: &str) -> Result<Placement, CliError> {
    Placement::ALL
        .into_iter()
        .find(|p| p.label() == s)
        .ok_or_else(|| CliError::InvalidArgument {
            name: "placement",
            value: s.to_string(),
        })
}

pub fn parse_search(s: &str) -> Result<FitSearch, CliError> {
    match s {
        "linear" => Ok(FitSearch::Linear),
        "bisect" => Ok(FitSearch::Bisect),
        _ => Err(CliError::InvalidArgument {
            name: "search",
            value: s.to_string(),
        }),
    }
}
