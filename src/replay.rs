//! Scroll replay: drives the theme engine from a line-based script.
//!
//! Each non-empty line is one command:
//!
//! ```text
//! scroll <top> <document> <viewport>   # new scroll sample
//! resize <document> <viewport>         # new geometry, same offset
//! progress <p>                         # raw progress fraction
//! theme <name>                         # force a stage
//! sample <p>                           # preview without changing state
//! ```

use anyhow::{anyhow, bail, Context, Result};
use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver};

use daybreak_theme::ThemeEngine;

use crate::render::CssRenderer;
use crate::scroll::ScrollMetrics;

/// One parsed replay line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Scroll(ScrollMetrics),
    Resize {
        document_height: f64,
        viewport_height: f64,
    },
    Progress(f64),
    Theme(String),
    Sample(f64),
}

fn parse_number(token: Option<&str>, what: &str) -> Result<f64> {
    let token = token.ok_or_else(|| anyhow!("missing {}", what))?;
    let value: f64 = token
        .parse()
        .with_context(|| format!("invalid {} '{}'", what, token))?;
    if !value.is_finite() {
        bail!("{} must be finite, got '{}'", what, token);
    }
    Ok(value)
}

/// Parse one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = match line.split_once('#') {
        Some((before, _)) => before,
        None => line,
    };
    let mut tokens = line.split_whitespace();
    let Some(keyword) = tokens.next() else {
        return Ok(None);
    };

    let command = match keyword {
        "scroll" => Command::Scroll(ScrollMetrics::new(
            parse_number(tokens.next(), "scroll offset")?,
            parse_number(tokens.next(), "document height")?,
            parse_number(tokens.next(), "viewport height")?,
        )),
        "resize" => Command::Resize {
            document_height: parse_number(tokens.next(), "document height")?,
            viewport_height: parse_number(tokens.next(), "viewport height")?,
        },
        "progress" => Command::Progress(parse_number(tokens.next(), "progress")?),
        "sample" => Command::Sample(parse_number(tokens.next(), "progress")?),
        "theme" => Command::Theme(
            tokens
                .next()
                .ok_or_else(|| anyhow!("missing theme name"))?
                .to_string(),
        ),
        other => bail!("unknown command '{}'", other),
    };

    if let Some(extra) = tokens.next() {
        bail!("unexpected argument '{}' after '{}'", extra, keyword);
    }
    Ok(Some(command))
}

/// Host side of the engine: scroll source, override control and render sink.
pub struct Replay {
    engine: ThemeEngine,
    renderer: CssRenderer,
    continuous: bool,
    metrics: ScrollMetrics,
    rendered: Receiver<String>,
}

impl Replay {
    /// Subscribes the render sink to `engine`.
    pub fn new(mut engine: ThemeEngine, renderer: CssRenderer, continuous: bool) -> Self {
        let (tx, rx) = mpsc::channel();
        let sink = renderer.clone();
        engine.subscribe(move |change| {
            let _ = tx.send(sink.render(change.theme, change.palette, change.progress));
        });

        Self {
            engine,
            renderer,
            continuous,
            metrics: ScrollMetrics::default(),
            rendered: rx,
        }
    }

    pub fn engine(&self) -> &ThemeEngine {
        &self.engine
    }

    /// Write the engine's current theme and palette.
    pub fn render_current(&self, out: &mut impl Write) -> Result<()> {
        let css = self.renderer.render(
            self.engine.current_theme(),
            self.engine.current_palette(),
            self.engine.progress(),
        );
        out.write_all(css.as_bytes())?;
        Ok(())
    }

    fn update_progress(&mut self, progress: f64, out: &mut impl Write) -> Result<()> {
        let changed = self.engine.set_progress(progress);
        self.flush(out)?;
        if !changed && self.continuous {
            self.render_current(out)?;
        }
        Ok(())
    }

    /// Write everything rendered by change notifications so far.
    fn flush(&self, out: &mut impl Write) -> Result<()> {
        for css in self.rendered.try_iter() {
            out.write_all(css.as_bytes())?;
        }
        Ok(())
    }

    pub fn apply(&mut self, command: Command, out: &mut impl Write) -> Result<()> {
        match command {
            Command::Scroll(metrics) => {
                self.metrics = metrics;
                self.update_progress(metrics.progress(), out)
            }
            Command::Resize {
                document_height,
                viewport_height,
            } => {
                self.metrics = self.metrics.resized(document_height, viewport_height);
                self.update_progress(self.metrics.progress(), out)
            }
            Command::Progress(progress) => self.update_progress(progress, out),
            Command::Theme(name) => {
                if !self.engine.set_theme(&name) {
                    writeln!(out, "/* unknown theme '{}' */", name)?;
                }
                self.flush(out)
            }
            Command::Sample(progress) => {
                let sample = self.engine.sample(progress);
                match sample.blend {
                    Some(ratio) => writeln!(out, "/* sample: blend {:.3} */", ratio)?,
                    None => writeln!(out, "/* sample */")?,
                }
                let css = self
                    .renderer
                    .render(&sample.theme, &sample.palette, progress);
                out.write_all(css.as_bytes())?;
                Ok(())
            }
        }
    }

    /// Apply every line of `input`, skipping lines that fail to parse.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        for (index, line) in input.lines().enumerate() {
            let line = line?;
            match parse_line(&line) {
                Ok(Some(command)) => self.apply(command, out)?,
                Ok(None) => {}
                Err(e) => daybreak_logger::warn(format!("line {}: {:#}", index + 1, e)),
            }
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn replay(continuous: bool) -> Replay {
        Replay::new(
            ThemeEngine::with_default_stages(),
            CssRenderer::new("--theme-", true),
            continuous,
        )
    }

    fn run_script(replay: &mut Replay, script: &str) -> String {
        let mut out = Vec::new();
        replay.run(Cursor::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_line("scroll 300 2000 800").unwrap(),
            Some(Command::Scroll(ScrollMetrics::new(300.0, 2000.0, 800.0)))
        );
        assert_eq!(
            parse_line("  resize 3000 900  # rotate").unwrap(),
            Some(Command::Resize {
                document_height: 3000.0,
                viewport_height: 900.0
            })
        );
        assert_eq!(
            parse_line("progress 0.6").unwrap(),
            Some(Command::Progress(0.6))
        );
        assert_eq!(
            parse_line("theme night").unwrap(),
            Some(Command::Theme("night".to_string()))
        );
        assert_eq!(parse_line("sample 1").unwrap(), Some(Command::Sample(1.0)));
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# header").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_line("jump 3").is_err());
        assert!(parse_line("scroll 1 2").is_err());
        assert!(parse_line("progress half").is_err());
        assert!(parse_line("progress NaN").is_err());
        assert!(parse_line("progress inf").is_err());
        assert!(parse_line("theme").is_err());
        assert!(parse_line("theme dusk night").is_err());
    }

    #[test]
    fn test_renders_only_on_theme_change() {
        let mut replay = replay(false);
        let out = run_script(
            &mut replay,
            "scroll 0 2000 800\nscroll 360 2000 800\nscroll 420 2000 800\n",
        );
        // 0 stays dawn, 0.3 switches to day, 0.35 stays day
        assert_eq!(out.matches(":root").count(), 1);
        assert!(out.contains(":root[data-theme=\"day\"]"));
        assert!(out.contains("data-scroll-progress: 30"));
        assert_eq!(replay.engine().current_theme(), "day");
    }

    #[test]
    fn test_continuous_renders_every_sample() {
        let mut replay = replay(true);
        let out = run_script(&mut replay, "progress 0.1\nprogress 0.3\nprogress 0.45\n");
        assert_eq!(out.matches(":root").count(), 3);
        assert_eq!(out.matches("data-theme=\"day\"").count(), 2);
    }

    #[test]
    fn test_resize_recomputes_progress() {
        let mut replay = replay(false);
        let out = run_script(&mut replay, "scroll 540 2000 800\nresize 6800 800\n");
        // 540 / 1200 = 0.45 (day), then 540 / 6000 = 0.09 (dawn)
        assert_eq!(replay.engine().current_theme(), "dawn");
        assert!(out.contains("data-theme=\"day\""));
        assert!(out.contains("data-theme=\"dawn\""));
    }

    #[test]
    fn test_theme_override() {
        let mut replay = replay(false);
        let out = run_script(&mut replay, "theme night\ntheme night\ntheme noon\n");
        assert_eq!(out.matches("data-theme=\"night\"").count(), 2);
        assert!(out.contains("/* unknown theme 'noon' */"));
        assert_eq!(replay.engine().current_theme(), "night");
    }

    #[test]
    fn test_sample_leaves_state() {
        let mut replay = replay(false);
        let out = run_script(&mut replay, "sample 0.45\nsample 0.9\n");
        assert!(out.contains("/* sample: blend 0.06"));
        assert!(out.contains("data-theme=\"night\""));
        assert_eq!(replay.engine().current_theme(), "dawn");
        assert_eq!(replay.engine().progress(), 0.0);
    }

    #[test]
    fn test_bad_lines_are_skipped() {
        let mut replay = replay(false);
        let out = run_script(&mut replay, "bogus\nprogress 0.9\n");
        assert!(out.contains("data-theme=\"night\""));
    }

    #[test]
    fn test_render_current() {
        let replay = replay(false);
        let mut out = Vec::new();
        replay.render_current(&mut out).unwrap();
        let css = String::from_utf8(out).unwrap();
        assert!(css.contains(":root[data-theme=\"dawn\"]"));
        assert!(css.contains("--theme-bg: #ffffff;"));
    }
}
