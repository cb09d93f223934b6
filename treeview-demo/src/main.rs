use std::cell::RefCell;
use std::fs::File;
use std::rc::Rc;

use simplelog::{Config, LevelFilter, WriteLogger};
use treeview::{
    Buffer, Cell, DataNode, DataSource, Document, Event, EventResult, InputHost, Key, ListenerKind, Rect, Terminal,
    TreeItem, TreeView, TreeViewConfig,
};

const WIDGET_ID: &str = "files";

fn sample_data() -> Vec<DataNode> {
    vec![
        DataNode::new("src")
            .with_label("src/")
            .child(DataNode::new("src/view").with_label("view/").with_children([
                DataNode::new("src/view/mod.rs").with_label("mod.rs"),
                DataNode::new("src/view/input.rs").with_label("input.rs"),
            ]))
            .child(DataNode::new("src/lib.rs").with_label("lib.rs"))
            .child(DataNode::new("src/main.rs").with_label("main.rs")),
        DataNode::new("tests")
            .with_label("tests/")
            .child(DataNode::new("tests/view.rs").with_label("view.rs")),
        DataNode::new("Cargo.toml"),
        DataNode::new("README.md"),
    ]
}

/// Listener kind an event is delivered to.
fn listener_kind(event: &Event) -> Option<ListenerKind> {
    match event {
        Event::Key { .. } => Some(ListenerKind::KeyDown),
        Event::Click { .. } => Some(ListenerKind::Click),
        Event::Resize { .. } => None,
    }
}

fn draw_status(buf: &mut Buffer, y: u16, text: &str) {
    let width = buf.width();
    buf.put_str(0, y, text, width, Cell::default());
}

fn run(data: Vec<DataNode>) -> treeview::Result<()> {
    let mut document = Document::new();
    let mut view = TreeView::with_data(TreeViewConfig::new(WIDGET_ID), data);

    let last_selected: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
    let sink = last_selected.clone();
    view.on_selected(move |event| {
        *sink.borrow_mut() = Some(event.item.id());
    });

    view.mount(&mut document)?;
    document.focus_widget(WIDGET_ID);

    let mut terminal = Terminal::new()?;

    loop {
        terminal.draw(|buf| {
            let height = buf.height();
            let tree_area = Rect::new(0, 0, buf.width(), height.saturating_sub(1));
            view.render(tree_area, buf);

            let status = match last_selected.borrow().as_deref() {
                Some(id) => format!("selected: {}   (arrows move, enter opens, q quits)", id),
                None => "arrows move, enter opens, q quits".to_string(),
            };
            draw_status(buf, height.saturating_sub(1), &status);
        })?;

        for event in terminal.poll(None)? {
            match event {
                Event::Key {
                    key: Key::Char('q') | Key::Escape,
                    ..
                } => {
                    view.unmount(&mut document)?;
                    return Ok(());
                }
                Event::Key { key: Key::Tab, .. } => {
                    document.focus_next_widget();
                }
                _ => {
                    let Some(kind) = listener_kind(&event) else {
                        continue;
                    };
                    for (_, owner) in document.listeners_for(kind) {
                        if owner != view.id() {
                            continue;
                        }
                        let result = view.handle_event(&mut document, &event);
                        log::trace!("[demo] {:?} -> {:?}", event, result);
                        if result == EventResult::Consumed {
                            break;
                        }
                    }
                }
            }
        }
    }
}

fn main() {
    if let Ok(log_file) = File::create("treeview-demo.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    let data = match std::env::args().nth(1) {
        Some(path) => match DataSource::from_path(&path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => sample_data(),
    };

    if let Err(e) = run(data) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
