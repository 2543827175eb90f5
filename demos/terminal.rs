//! Interactive range slider in the terminal.
//!
//! Drag a handle with the mouse, or click the track outside the selection to
//! pull the nearest handle there. Press `d` to toggle enabled, `q` to quit.
//!
//! Run with `RUST_LOG=debug cargo run --example terminal 2> slider.log` to see
//! gesture logging.

use std::cell::RefCell;
use std::io::{stdout, Stdout, Write};
use std::rc::Rc;
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::KeyCode;
use crossterm::style::Print;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use spark_range::state::input::{
    disable_mouse, enable_mouse, poll_event, InputEvent, TerminalTrack, TrackBridge,
};
use spark_range::{RangeSlider, RangeSliderProps, Thumb};

const TRACK_COLUMN: u16 = 4;
const TRACK_ROW: u16 = 3;

fn track_for(width: u16) -> TerminalTrack {
    TerminalTrack {
        column: TRACK_COLUMN,
        row: TRACK_ROW,
        width: width.saturating_sub(TRACK_COLUMN * 2).max(2),
    }
}

fn draw(
    out: &mut Stdout,
    slider: &RangeSlider,
    track: TerminalTrack,
    status: &str,
) -> std::io::Result<()> {
    let layout = slider.layout();
    let min_column = track.column_of(layout.min_position);
    let max_column = track.column_of(layout.max_position);

    let mut row = String::with_capacity(usize::from(track.width));
    for column in track.column..track.column + track.width {
        let cell = if column == min_column || column == max_column {
            if column == min_column && column == max_column {
                match slider.top_thumb() {
                    Thumb::Min => '[',
                    Thumb::Max => ']',
                }
            } else if column == min_column {
                '['
            } else {
                ']'
            }
        } else if column > min_column && column < max_column {
            '='
        } else {
            '-'
        };
        row.push(cell);
    }

    queue!(
        out,
        Clear(ClearType::All),
        MoveTo(TRACK_COLUMN, 1),
        Print(format!(
            "range {:.2} .. {:.2} of [{:.0}, {:.0}]   state: {}",
            slider.range_min(),
            slider.range_max(),
            slider.minimum(),
            slider.maximum(),
            slider.visual_state().name(),
        )),
        MoveTo(track.column, track.row),
        Print(row),
        MoveTo(TRACK_COLUMN, TRACK_ROW + 2),
        Print(status),
        MoveTo(TRACK_COLUMN, TRACK_ROW + 4),
        Print("drag handles with the mouse, d: toggle enabled, q: quit"),
    )?;
    out.flush()
}

fn run(out: &mut Stdout) -> std::io::Result<()> {
    let (width, _) = crossterm::terminal::size()?;
    let last_change = Rc::new(RefCell::new(String::from("no changes yet")));

    let mut slider = RangeSlider::new(RangeSliderProps {
        minimum: Some(0.0),
        maximum: Some(100.0),
        range_min: Some(25.0),
        range_max: Some(75.0),
        track_length: Some(track_for(width).track_length()),
        ..Default::default()
    });
    let _cleanup = slider.on_range_changed({
        let last_change = last_change.clone();
        move |event| {
            if !event.is_change() {
                return;
            }
            *last_change.borrow_mut() = format!(
                "{} changed {:.2} -> {:.2}",
                event.endpoint, event.old_value, event.new_value
            );
        }
    });
    let mut bridge = TrackBridge::new(track_for(width));

    loop {
        draw(out, &slider, bridge.track(), &last_change.borrow())?;

        match poll_event(Duration::from_millis(50))? {
            Some(InputEvent::Mouse(mouse)) => {
                bridge.route_mouse(&mut slider, mouse);
            }
            Some(InputEvent::Key(key)) => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('d') => {
                    let enabled = slider.is_enabled();
                    slider.set_enabled(!enabled);
                }
                _ => {}
            },
            Some(InputEvent::Resize(w, _)) => bridge.set_track(&mut slider, track_for(w)),
            Some(InputEvent::None) | None => {}
        }
    }
}

fn main() -> std::io::Result<()> {
    env_logger::init();

    let mut out = stdout();
    enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, Hide)?;
    enable_mouse()?;

    let result = run(&mut out);

    disable_mouse()?;
    execute!(out, Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}
