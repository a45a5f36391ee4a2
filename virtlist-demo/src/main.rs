mod config;
mod paths;
mod rows;

use std::fs::File;
use std::io;

use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};
use virtdom::render::render_viewport;
use virtdom::{Dom, Event, Key, Node, Rgb, Style, Terminal};
use virtlist::ListControl;

use config::DemoConfig;
use rows::{Row, RowDelegate, RowSource};

type RowList = ListControl<Row, RowDelegate>;

/// Rows added by `a`.
const APPEND_COUNT: usize = 1000;

const STATUS_BG: Rgb = Rgb::new(0x28, 0x2c, 0x34);

fn main() -> io::Result<()> {
    let config = match paths::config_file() {
        Some(path) => DemoConfig::load(&path),
        None => Ok(DemoConfig::default()),
    };
    let config = config.map_err(io::Error::other)?;
    init_logging(&config)?;

    let mode = config.list_mode().map_err(io::Error::other)?;
    info!("starting in {mode} mode with {} rows", config.item_count);

    let mut source = RowSource::new(config.min_height, config.max_height);
    let mut list = RowList::new(RowDelegate::new(), mode);
    list.set_handle_input(true);

    let result = run(&mut list, &mut source, config.item_count);
    if let Err(e) = &result {
        error!("terminal error: {e}");
    }
    result
}

fn init_logging(config: &DemoConfig) -> io::Result<()> {
    let level = config.level_filter().unwrap_or(LevelFilter::Debug);
    let log_file = File::create(paths::prepare_log_file()?)?;
    WriteLogger::init(level, Config::default(), log_file).map_err(io::Error::other)
}

fn run(list: &mut RowList, source: &mut RowSource, item_count: usize) -> io::Result<()> {
    let mut term = Terminal::new()?;
    let (_, height) = term.size();
    set_viewport(list, height);
    list.replace_all_items(source.take(item_count));

    loop {
        let status = status_line(list);
        term.draw(|area, buf| {
            let (body, footer) = area.split_bottom(1);
            render_viewport(list.element(), body, buf);
            render_viewport(&status, footer, buf);
        })?;

        for raw in term.poll(None)? {
            let Some(event) = Event::from_crossterm(&raw, list.element(), 0) else {
                continue;
            };
            match event {
                Event::Key {
                    key: Key::Char('q') | Key::Escape,
                    ..
                } => return Ok(()),
                Event::Key {
                    key: Key::Char('a'),
                    ..
                } => {
                    let len = list.length();
                    list.replace_items_in_range(len, len, source.take(APPEND_COUNT));
                }
                Event::Key {
                    key: Key::Char('d'),
                    ..
                } => {
                    if let Some(index) = list.selected_index() {
                        list.remove_item_at_index(index);
                    }
                }
                Event::Key {
                    key: Key::Char('r'),
                    ..
                } => {
                    let count = list.length().max(1);
                    list.replace_all_items(source.take(count));
                }
                Event::Resize { height, .. } => set_viewport(list, height),
                other => {
                    list.handle_event(&other);
                }
            }
            let restyles = list.delegate_mut().take_restyles();
            rows::apply_restyles(list.element_mut(), restyles);
        }
    }
}

/// The list gets every terminal row except the status line.
fn set_viewport(list: &mut RowList, terminal_height: u16) {
    list.element_mut()
        .set_viewport_height(u32::from(terminal_height.saturating_sub(1)));
    list.viewport_resized();
}

fn status_line(list: &mut RowList) -> Dom {
    let window = list.render_window();
    let selected = list
        .selected_item()
        .map_or_else(|| "none".to_string(), |row| format!("row {}", row.id));
    let text = format!(
        " {} | {} rows | height {} | window {}..{} | selected {} | realized {} | a:append d:delete r:replace q:quit",
        list.mode(),
        list.length(),
        list.total_height(),
        window.start,
        window.end,
        selected,
        list.delegate().created(),
    );
    let mut dom = Dom::new();
    let root = dom.root();
    let line = dom.insert(Node::text(text).style(Style::new().background(STATUS_BG)));
    dom.append_child(root, line);
    dom
}
