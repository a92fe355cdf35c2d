use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    terminal,
};
use std::io::{self, Write};
use std::sync::Once;
use std::time::Duration;
use unicode_width::UnicodeWidthChar;

use crate::engine::{Track, Translation};
use crate::i18n::I18n;
use crate::suggest::Suggester;

// Re-check cadence between keyboard events
const TICK_MS: u64 = 100;

/// Interactive shell: edit one input line, re-run both tracks whenever the
/// text changes, and render the two results underneath.
pub fn run(
    tracks: &mut [Track; 2],
    suggester: &Suggester,
    i18n: &I18n,
    use_alt_screen: bool,
    max_suggestions: usize,
) -> Result<()> {
    let mut stdout = io::stdout();

    static INIT_CTRL_C: Once = Once::new();
    INIT_CTRL_C.call_once(|| {
        let _ = ctrlc::set_handler(move || {
            // Best-effort restore terminal state and exit with 130
            let _ = terminal::disable_raw_mode();
            print!("\x1b[?7h\x1b[?25h\x1b[?1049l");
            let _ = io::stdout().flush();
            std::process::exit(130);
        });
    });

    if terminal::enable_raw_mode().is_err() {
        println!("{}", i18n.t("warning_interactive_failed"));
        return Ok(());
    }

    if use_alt_screen {
        print!("\x1b[?1049h");
    }
    // Disable line wrap and hide cursor; the input line draws its own cursor
    print!("\x1b[?7l\x1b[?25l");
    stdout.flush().ok();

    let mut input = String::new();
    let mut last_input: Option<String> = None;
    let mut results = [Translation::Empty, Translation::Empty];
    let mut suggestions: Vec<String> = Vec::new();

    loop {
        // Re-translate only when the input changed since the last pass
        if last_input.as_deref() != Some(input.as_str()) {
            last_input = Some(input.clone());

            for (track, slot) in tracks.iter_mut().zip(results.iter_mut()) {
                *slot = track.translate(&input, i18n);
            }

            suggestions.clear();
            if results.iter().any(|r| *r == Translation::NoMatch) {
                let mut names: Vec<&str> =
                    tracks.iter().flat_map(|t| t.index.names()).collect();
                names.sort_unstable();
                names.dedup();
                suggestions = suggester
                    .suggest(&input, names.into_iter(), max_suggestions)
                    .into_iter()
                    .map(|s| s.to_string())
                    .collect();
            }

            render(tracks, &results, &suggestions, &input, i18n, &mut stdout)?;
        }

        if !event::poll(Duration::from_millis(TICK_MS))? {
            continue;
        }

        if let Event::Key(key_event) = event::read()? {
            // Handle Ctrl+C / Ctrl+D for exit (modifiers or control chars)
            let is_ctrl_combo = key_event.modifiers.contains(KeyModifiers::CONTROL);
            let is_ctrl_char = matches!(key_event.code,
                KeyCode::Char(c) if c == '\u{3}' || c == '\u{4}');
            if is_ctrl_combo || is_ctrl_char {
                let exit_match = matches!(
                    key_event.code,
                    KeyCode::Char('c')
                        | KeyCode::Char('C')
                        | KeyCode::Char('d')
                        | KeyCode::Char('D')
                        | KeyCode::Char('\u{3}')
                        | KeyCode::Char('\u{4}')
                );
                if exit_match {
                    break;
                }
            }

            match key_event.code {
                KeyCode::Esc => break,
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Delete => {
                    input.clear();
                }
                KeyCode::Char(c) => {
                    input.push(c);
                }
                _ => {}
            }
        }
    }

    // Restore terminal settings (alt screen if used)
    print!("\x1b[2J\x1b[H");
    if use_alt_screen {
        print!("\x1b[?1049l");
    }
    print!("\x1b[?7h\x1b[?25h");
    stdout.flush().ok();
    let _ = terminal::disable_raw_mode();

    Ok(())
}

fn render(
    tracks: &[Track; 2],
    results: &[Translation; 2],
    suggestions: &[String],
    input: &str,
    i18n: &I18n,
    stdout: &mut io::Stdout,
) -> Result<()> {
    let (cols, _rows) = terminal::size().unwrap_or((80, 24));

    print!("\x1b[2J\x1b[H");
    print!("{}\r\n", i18n.t("input_placeholder"));

    // "> " prompt plus the drawn cursor block take four columns
    let budget = (cols as usize).saturating_sub(4).max(4);
    print!("> {}\x1b[7m \x1b[0m\x1b[K\r\n", fit_tail(input, budget));
    print!("\r\n");

    for (track, result) in tracks.iter().zip(results.iter()) {
        let text = match (result, &track.load_error) {
            // Dictionary load errors sit inline in the result field until
            // the user starts typing
            (Translation::Empty, Some(err)) => format!("\x1b[31m{}\x1b[0m", err),
            (Translation::Empty, None) => String::new(),
            (Translation::NoMatch, _) => format!("\x1b[33m{}\x1b[0m", result.render(i18n)),
            (Translation::TableMissing, _) => format!("\x1b[31m{}\x1b[0m", result.render(i18n)),
            (Translation::Found(_), _) => format!("\x1b[32m{}\x1b[0m", result.render(i18n)),
        };
        print!("{}: {}\x1b[K\r\n", track.label, text);
    }

    if !suggestions.is_empty() {
        print!(
            "\r\n\x1b[90m{}\x1b[0m\x1b[K\r\n",
            i18n.t_format("did_you_mean", &[&suggestions.join("  ")])
        );
    }

    print!("\r\n\x1b[90m{}\x1b[0m\x1b[K\r\n", i18n.t("watch_hint"));
    stdout.flush()?;
    Ok(())
}

/// Tail of `text` that fits in `max_width` terminal columns, so the end of a
/// long input stays visible next to the cursor. CJK characters are two
/// columns wide.
fn fit_tail(text: &str, max_width: usize) -> &str {
    let mut width = 0;
    let mut start = text.len();
    for (idx, ch) in text.char_indices().rev() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        start = idx;
    }
    &text[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_tail_keeps_short_input_intact() {
        assert_eq!(fit_tail("venti", 10), "venti");
        assert_eq!(fit_tail("", 10), "");
    }

    #[test]
    fn fit_tail_trims_from_the_front() {
        assert_eq!(fit_tail("abcdef", 3), "def");
    }

    #[test]
    fn fit_tail_counts_cjk_as_double_width() {
        // Four columns fit exactly two CJK characters
        assert_eq!(fit_tail("雷电将军", 4), "将军");
        // An odd budget cannot split a double-width character
        assert_eq!(fit_tail("雷电将军", 5), "将军");
    }
}
