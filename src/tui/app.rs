use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::model::{TabConfig, TabItem, TabStripConfig};
use crate::tabs::callbacks::TabCallbacks;
use crate::tabs::host::TerminalHost;
use crate::tabs::placement::FormFactor;
use crate::tabs::{BarOptions, TabBar};

use super::input;
use super::render;
use super::theme::Theme;

/// Columns (or rows, on vertical bars) taken away per `[` press
pub const INSET_STEP: u16 = 2;

/// State of the interactive demo
pub struct App {
    pub bar: TabBar<String>,
    pub theme: Theme,
    /// Highlighted entry while the overflow menu is open
    pub menu_cursor: usize,
    /// How much of the bar's extent is withheld, to exercise the fit
    pub inset: u16,
    pub form_factor: FormFactor,
    /// Last notification from the bar, shown in the status row
    pub last_event: Rc<RefCell<String>>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &TabStripConfig) -> Self {
        let items: Vec<TabItem<String>> = if config.tabs.is_empty() {
            demo_tabs()
        } else {
            config.tabs.iter().map(TabConfig::to_item).collect()
        };

        let last_event = Rc::new(RefCell::new(String::new()));
        let created = Rc::new(Cell::new(items.len()));
        let callbacks = TabCallbacks::new()
            .on_changed({
                let last_event = Rc::clone(&last_event);
                move |item| {
                    *last_event.borrow_mut() = match item {
                        Some(item) => format!("selected {}", item.label),
                        None => "selection cleared".to_string(),
                    };
                }
            })
            .on_removed({
                let last_event = Rc::clone(&last_event);
                move |item| *last_event.borrow_mut() = format!("closed {}", item.label)
            })
            .on_item_requested(move || {
                let n = created.get() + 1;
                created.set(n);
                Some(TabItem::new(
                    format!("Tab {}", n),
                    format!("Created with the add button (#{})", n),
                ))
            });

        let form_factor = config.bar.form_factor;
        let bar = TabBar::with_options(items, BarOptions::from(config), TerminalHost::new(form_factor))
            .with_callbacks(callbacks);

        App {
            bar,
            theme: Theme::from_config(&config.ui),
            menu_cursor: 0,
            inset: 0,
            form_factor,
            last_event,
            should_quit: false,
        }
    }

    /// The region handed to the bar: `area` minus the inset along the fit axis.
    pub fn strip_area(&self, area: Rect) -> Rect {
        if self.bar.placement().is_vertical() {
            let height = area.height.saturating_sub(self.inset).max(1);
            Rect::new(area.x, area.y, area.width, height)
        } else {
            let width = area.width.saturating_sub(self.inset).max(1);
            Rect::new(area.x, area.y, width, area.height)
        }
    }

    pub fn toggle_form_factor(&mut self) {
        self.form_factor = match self.form_factor {
            FormFactor::Desktop => FormFactor::Compact,
            FormFactor::Compact => FormFactor::Desktop,
        };
        self.bar.set_host(TerminalHost::new(self.form_factor));
    }

    pub fn shrink(&mut self) {
        self.inset = self.inset.saturating_add(INSET_STEP);
    }

    pub fn grow(&mut self) {
        self.inset = self.inset.saturating_sub(INSET_STEP);
    }
}

fn demo_tabs() -> Vec<TabItem<String>> {
    [
        ("Overview", "Everything at a glance."),
        ("Inbox", "3 unread messages."),
        ("Drafts", "Nothing drafted yet."),
        ("Sent", "Last sent yesterday."),
        ("Archive", "Older conversations live here."),
        ("Spam", "Empty."),
        ("Settings", "Preferences and accounts."),
        ("Help", "Press q to quit."),
    ]
    .into_iter()
    .map(|(label, content)| TabItem::new(label, content.to_string()))
    .collect()
}

pub fn run(config: TabStripConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(&config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    tracing::info!(tabs = app.bar.len(), placement = app.bar.placement().label(), "demo started");
    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                // The next draw lays the bar out in the new size
                Event::Resize(width, height) => {
                    tracing::debug!(width, height, "terminal resized");
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
