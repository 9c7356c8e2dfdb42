//! Terminal front-end — stdin/stdout loop driving the wizard.
//!
//! Renders one step at a time and reads one line per action, so at most
//! one request is ever in flight. Transient failures re-render the same
//! step; malformed service responses offer a restart.

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::{Error, ServiceError};
use crate::model::PriceResult;
use crate::wizard::{Wizard, WizardStep};

/// Run the interactive wizard session until a price is shown, a terminal
/// node is reached, or the user quits with `stop`.
pub async fn run(wizard: &mut Wizard) -> anyhow::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    // A startup failure is fatal: there is nothing to re-render yet.
    let mut step = wizard
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("Kon de keuzegids niet starten: {e}"))?;

    loop {
        match &step {
            WizardStep::Price(result) => {
                println!("{}", render_price(result));
                return Ok(());
            }
            WizardStep::Finished { text } => {
                if !text.is_empty() {
                    println!("\n{text}");
                }
                return Ok(());
            }
            other => println!("{}", render_step(other)),
        }
        eprint!("> ");

        let line = match lines.next_line().await? {
            Some(line) => line.trim().to_string(),
            None => return Ok(()), // EOF
        };
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("stop") {
            return Ok(());
        }

        let outcome = match &step {
            WizardStep::Question { answers, .. } => match parse_choice(&line, answers.len()) {
                Some(index) => wizard.submit_choice(index).await,
                None => {
                    println!("Maak een keuze van 1 t/m {}.", answers.len());
                    continue;
                }
            },
            WizardStep::SurfaceArea { .. } | WizardStep::RoomCount { .. } => {
                wizard.submit_input(&line).await
            }
            WizardStep::Price(_) | WizardStep::Finished { .. } => unreachable!("handled above"),
        };

        match outcome {
            Ok(next) => step = next,
            Err(Error::Input(e)) => {
                // Inline validation message; the same field stays open.
                println!("{e}");
            }
            Err(Error::Service(ServiceError::Transport(reason))) => {
                tracing::warn!(%reason, "decision service unreachable");
                println!("De keuzegids is even niet bereikbaar. Probeer het opnieuw.");
            }
            Err(Error::Service(e)) => {
                // Unexpected status or malformed payload: this step is lost.
                tracing::error!(error = %e, "unusable response from decision service");
                println!("Er ging iets mis: {e}");
                eprint!("Opnieuw beginnen? (j/n) ");
                match lines.next_line().await? {
                    Some(answer) if answer.trim().eq_ignore_ascii_case("j") => {
                        step = wizard
                            .start()
                            .await
                            .map_err(|e| anyhow::anyhow!("Herstart mislukt: {e}"))?;
                    }
                    _ => return Ok(()),
                }
            }
            Err(e @ Error::Config(_)) => return Err(e.into()),
        }
    }
}

/// Parse a 1-based menu choice into the zero-based index the protocol uses.
fn parse_choice(line: &str, answer_count: usize) -> Option<usize> {
    let n: usize = line.trim().parse().ok()?;
    // Range errors are reported by the wizard itself; only reject 0 here
    // since there is no zero'th menu entry to map it to.
    if n == 0 || answer_count == 0 {
        return None;
    }
    Some(n - 1)
}

fn render_step(step: &WizardStep) -> String {
    match step {
        WizardStep::Question { text, answers } => {
            let mut out = format!("\n{text}\n");
            for (i, answer) in answers.iter().enumerate() {
                out.push_str(&format!("{}.   {answer}\n", i + 1));
            }
            out.push_str("Maak een keuze:");
            out
        }
        WizardStep::SurfaceArea { system } => {
            format!("\nGekozen systeem: {system}\nVoer oppervlakte in (m²), bijv. 120:")
        }
        WizardStep::RoomCount { .. } => "\nAantal ruimtes? (1, 2 of 3)".to_string(),
        WizardStep::Price(_) | WizardStep::Finished { .. } => String::new(),
    }
}

fn render_price(result: &PriceResult) -> String {
    format!(
        "\n--- BASISPRIJS ---\n\
         Systeem:      {}\n\
         Oppervlakte:  {} m²\n\
         Ruimtes:      {}\n\
         Staffel:      {}\n\
         Prijs per m²: €{:.2}\n\
         Basisprijs:   €{:.2}",
        result.systeem,
        result.oppervlakte,
        result.ruimtes,
        result.staffel,
        result.prijs_m2,
        result.basis,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_rendering_numbers_answers_from_one() {
        let step = WizardStep::Question {
            text: "Welke woning?".into(),
            answers: vec!["Appartement".into(), "Huis".into()],
        };
        let out = render_step(&step);
        assert!(out.contains("Welke woning?"));
        assert!(out.contains("1.   Appartement"));
        assert!(out.contains("2.   Huis"));
        assert!(out.contains("Maak een keuze:"));
    }

    #[test]
    fn choice_parsing_maps_to_zero_based() {
        assert_eq!(parse_choice("1", 2), Some(0));
        assert_eq!(parse_choice(" 2 ", 2), Some(1));
        assert_eq!(parse_choice("0", 2), None);
        assert_eq!(parse_choice("twee", 2), None);
        assert_eq!(parse_choice("1", 0), None);
    }

    #[test]
    fn price_rendering_shows_all_fields() {
        let out = render_price(&PriceResult {
            systeem: "DOS Basic".into(),
            oppervlakte: 120.0,
            ruimtes: 2,
            staffel: "100-150".into(),
            prijs_m2: 27.5,
            basis: 3300.0,
        });
        assert!(out.contains("DOS Basic"));
        assert!(out.contains("120 m²"));
        assert!(out.contains("100-150"));
        assert!(out.contains("€27.50"));
        assert!(out.contains("€3300.00"));
    }
}
