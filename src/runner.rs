// std
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::time::Instant;
// crates
use crossbeam::channel::{self, Receiver};
use rand::Rng;
use serde::Serialize;
// internal
use crate::controller::{DRAW_TRIGGER, RESET_TRIGGER};
use crate::outcome::OUTCOMES;
use crate::page::Page;
use crate::settings::{ControllerSettings, Settings};

/// A line typed into the interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Draw,
    Reset,
    Tab,
    Enter,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draw" | "d" => Ok(Self::Draw),
            "reset" | "r" => Ok(Self::Reset),
            "tab" | "t" => Ok(Self::Tab),
            "enter" | "e" => Ok(Self::Enter),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(anyhow::anyhow!("Unknown command `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OutcomeCount {
    pub label: &'static str,
    pub style_tag: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrialSummary {
    pub trials: usize,
    pub counts: Vec<OutcomeCount>,
}

impl TrialSummary {
    pub fn missing(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.counts
            .iter()
            .filter(|count| count.count == 0)
            .map(|count| count.label)
    }
}

/// Runs `trials` full draw/reset cycles through the page in simulated time.
pub fn run_trials<R: Rng>(
    settings: ControllerSettings,
    rng: R,
    trials: usize,
) -> anyhow::Result<TrialSummary> {
    let mut page = Page::load(settings, rng)?;
    let mut counts = vec![0usize; OUTCOMES.size()];
    for trial in 0..trials {
        page.click(DRAW_TRIGGER)?;
        let outcome = page
            .wait(settings.draw_delay)
            .ok_or_else(|| anyhow::anyhow!("trial {trial}: draw did not complete"))?;
        if let Some(index) = OUTCOMES.position(outcome.label) {
            counts[index] += 1;
        }
        page.click(RESET_TRIGGER)?;
    }
    let counts = OUTCOMES
        .iter()
        .zip(counts)
        .map(|(outcome, count)| OutcomeCount {
            label: outcome.label,
            style_tag: outcome.style_tag,
            count,
        })
        .collect();
    Ok(TrialSummary { trials, counts })
}

/// Wall-clock session driven by `commands`. Returns on `quit`, when the
/// command stream closes, or when `stop` fires.
pub fn run_interactive<R: Rng, W: Write>(
    settings: &Settings,
    rng: R,
    commands: Receiver<String>,
    stop: Receiver<()>,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut page = Page::load(settings.controller, rng)?;
    let mut rendered = page.render();
    writeln!(out, "{rendered}")?;
    out.flush()?;

    let mut last_tick = Instant::now();
    loop {
        crossbeam::select! {
            recv(stop) -> _ => {
                tracing::info!("gracefully shutdown the omikuji session");
                break;
            },
            recv(commands) -> line => {
                let Ok(line) = line else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => apply(&mut page, command),
                    Err(e) => tracing::warn!("{e}"),
                }
            },
            default(settings.step_time) => {},
        }

        let now = Instant::now();
        page.wait(now.duration_since(last_tick));
        last_tick = now;

        let view = page.render();
        if view != rendered {
            writeln!(out, "{view}")?;
            out.flush()?;
            rendered = view;
        }
    }
    Ok(())
}

fn apply<R: Rng>(page: &mut Page<R>, command: Command) {
    let result = match command {
        Command::Draw => page.click(DRAW_TRIGGER),
        Command::Reset => page.click(RESET_TRIGGER),
        Command::Tab => {
            page.press_tab();
            Ok(())
        }
        Command::Enter => page.press_enter(),
        Command::Quit => Ok(()),
    };
    if let Err(e) = result {
        tracing::warn!("{command:?} ignored: {e}");
    }
}

/// Forwards stdin lines until EOF.
pub fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = channel::unbounded();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::DRAW_LABEL;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::time::Duration;

    #[test]
    fn parse_commands() {
        assert_eq!("draw".parse::<Command>().unwrap(), Command::Draw);
        assert_eq!(" Reset\n".parse::<Command>().unwrap(), Command::Reset);
        assert_eq!("T".parse::<Command>().unwrap(), Command::Tab);
        assert_eq!("enter".parse::<Command>().unwrap(), Command::Enter);
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
        assert!("shake".parse::<Command>().is_err());
    }

    #[test]
    fn trials_cover_every_outcome() {
        let summary =
            run_trials(ControllerSettings::default(), ChaCha12Rng::seed_from_u64(3), 600).unwrap();
        assert_eq!(summary.trials, 600);
        assert_eq!(summary.counts.len(), 6);
        assert_eq!(summary.counts.iter().map(|c| c.count).sum::<usize>(), 600);
        assert_eq!(summary.missing().count(), 0);
    }

    #[test]
    fn trials_are_reproducible_with_a_seed() {
        let run = |seed| {
            run_trials(ControllerSettings::default(), ChaCha12Rng::seed_from_u64(seed), 50)
                .unwrap()
                .counts
                .into_iter()
                .map(|c| c.count)
                .collect::<Vec<_>>()
        };
        assert_eq!(run(11), run(11));
    }

    #[test]
    fn interactive_session_draws_and_quits() {
        let settings = Settings {
            controller: ControllerSettings {
                draw_delay: Duration::from_millis(20),
                ..Default::default()
            },
            step_time: Duration::from_millis(5),
            seed: None,
        };
        let (tx, rx) = channel::unbounded();
        let (_stop_tx, stop_rx) = channel::bounded(1);
        tx.send("draw".to_owned()).unwrap();
        tx.send("bogus".to_owned()).unwrap();

        let handle = std::thread::spawn(move || -> anyhow::Result<String> {
            let mut out = Vec::new();
            run_interactive(&settings, ChaCha12Rng::seed_from_u64(1), rx, stop_rx, &mut out)?;
            Ok(String::from_utf8(out)?)
        });
        std::thread::sleep(Duration::from_millis(200));
        tx.send("reset".to_owned()).unwrap();
        tx.send("quit".to_owned()).unwrap();

        let out = handle.join().unwrap().unwrap();
        assert!(out.contains(DRAW_LABEL));
        assert!(OUTCOMES.iter().any(|outcome| out.contains(outcome.style_tag)));
    }

    #[test]
    fn interactive_session_stops_on_signal() {
        let settings = Settings::default();
        let (_tx, rx) = channel::unbounded::<String>();
        let (stop_tx, stop_rx) = channel::bounded(1);
        stop_tx.send(()).unwrap();
        let mut out = Vec::new();
        run_interactive(&settings, ChaCha12Rng::seed_from_u64(1), rx, stop_rx, &mut out).unwrap();
        assert!(!out.is_empty());
    }
}
