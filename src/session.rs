//! Interactive terminal session: the Predict and About views.
//!
//! The Predict view walks the six questions the model needs, re-prompting
//! on anything invalid so that, like the original closed-choice widgets,
//! only in-range values ever reach the encoder. Blank answers take the
//! documented defaults.

use crate::context::InferenceContext;
use crate::types::customer::{Contract, CustomerProfile, Gender, InternetService};
use crate::types::prediction::ChurnPrediction;
use anyhow::Result;
use serde_json::Value;
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::info;

const RED: &str = "\x1b[1;31m";
const GREEN: &str = "\x1b[1;32m";
const CYAN: &str = "\x1b[1;36m";
const RESET: &str = "\x1b[0m";

/// Navigable views, plus quit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Predict,
    About,
    Quit,
}

/// Parse navigation input: menu number or view name.
pub fn parse_view(input: &str) -> Option<View> {
    match input.trim().to_lowercase().as_str() {
        "1" | "predict" => Some(View::Predict),
        "2" | "about" => Some(View::About),
        "q" | "quit" | "exit" => Some(View::Quit),
        _ => None,
    }
}

/// Parse a closed-choice answer: 1-based menu index or the exact option
/// string. Blank selects the default index.
pub fn parse_choice(input: &str, choices: &[&str], default: usize) -> Option<usize> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Some(default);
    }
    if let Ok(n) = trimmed.parse::<usize>() {
        return (1..=choices.len()).contains(&n).then(|| n - 1);
    }
    choices.iter().position(|&c| c == trimmed)
}

/// Parse an integer answer constrained to `[min, max]`, like the original
/// slider. Blank selects the default.
pub fn parse_ranged_u32(input: &str, min: u32, max: u32, default: u32) -> Option<u32> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Some(default);
    }
    trimmed
        .parse::<u32>()
        .ok()
        .filter(|v| (min..=max).contains(v))
}

/// Parse a float answer constrained to `[min, max]`. Blank selects the
/// default.
pub fn parse_ranged_f64(input: &str, min: f64, max: f64, default: f64) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Some(default);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= min && *v <= max)
}

/// Risk banner line: red for churn, green for retention, probability with
/// two decimals, exactly as the original rendered it.
pub fn render_banner(prediction: &ChurnPrediction) -> String {
    if prediction.label.is_churn() {
        format!(
            "{RED}High risk: {:.2}%{RESET}",
            prediction.probability_pct
        )
    } else {
        format!(
            "{GREEN}Low risk: {:.2}%{RESET}",
            prediction.probability_pct
        )
    }
}

/// One interactive session over arbitrary reader/writer streams.
pub struct Session<'a> {
    context: &'a InferenceContext,
    motif: Option<Value>,
}

impl<'a> Session<'a> {
    pub fn new(context: &'a InferenceContext, motif: Option<Value>) -> Self {
        Self { context, motif }
    }

    /// Main loop: navigate between views until quit or EOF.
    pub fn run<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<()> {
        loop {
            writeln!(output, "\n{CYAN}Churn Predictor{RESET}")?;
            writeln!(output, "  [1] Predict  [2] About  [q] Quit")?;
            write!(output, "> ")?;
            output.flush()?;

            let Some(line) = read_line(input)? else {
                return Ok(());
            };

            match parse_view(&line) {
                Some(View::Predict) => {
                    let Some(profile) = self.collect_profile(input, output)? else {
                        return Ok(());
                    };
                    let prediction = self.context.predict(&profile)?;
                    info!(
                        label = ?prediction.label,
                        probability_pct = prediction.probability_pct,
                        "Prediction rendered"
                    );
                    writeln!(output, "\n{}", render_banner(&prediction))?;
                }
                Some(View::About) => self.render_about(output)?,
                Some(View::Quit) => return Ok(()),
                None => writeln!(output, "Unrecognized choice.")?,
            }
        }
    }

    /// Walk the six questions; `None` means the input stream ended.
    fn collect_profile<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<Option<CustomerProfile>> {
        let defaults = CustomerProfile::example();

        let Some(gender) =
            self.ask_choice::<Gender, _, _>(input, output, "Gender", &Gender::CHOICES, 0)?
        else {
            return Ok(None);
        };
        let Some(tenure_months) = self.ask_u32(
            input,
            output,
            "Tenure (months, 0-72)",
            0,
            72,
            defaults.tenure_months,
        )?
        else {
            return Ok(None);
        };
        let Some(monthly_charges) = self.ask_f64(
            input,
            output,
            "Monthly charges (0-200)",
            0.0,
            200.0,
            defaults.monthly_charges,
        )?
        else {
            return Ok(None);
        };
        let Some(total_charges) = self.ask_f64(
            input,
            output,
            "Total charges (0-10000)",
            0.0,
            10000.0,
            defaults.total_charges,
        )?
        else {
            return Ok(None);
        };
        let Some(internet_service) = self.ask_choice::<InternetService, _, _>(
            input,
            output,
            "Internet service",
            &InternetService::CHOICES,
            0,
        )?
        else {
            return Ok(None);
        };
        let Some(contract) = self.ask_choice::<Contract, _, _>(
            input,
            output,
            "Contract type",
            &Contract::CHOICES,
            0,
        )?
        else {
            return Ok(None);
        };

        Ok(Some(CustomerProfile {
            gender,
            tenure_months,
            monthly_charges,
            total_charges,
            internet_service,
            contract,
        }))
    }

    fn ask_choice<T, R, W>(
        &self,
        input: &mut R,
        output: &mut W,
        label: &str,
        choices: &[&str],
        default: usize,
    ) -> Result<Option<T>>
    where
        T: FromStr,
        R: BufRead,
        W: Write,
    {
        loop {
            writeln!(output, "{label}:")?;
            for (i, choice) in choices.iter().enumerate() {
                writeln!(output, "  [{}] {}", i + 1, choice)?;
            }
            write!(output, "> ")?;
            output.flush()?;

            let Some(line) = read_line(input)? else {
                return Ok(None);
            };
            if let Some(index) = parse_choice(&line, choices, default) {
                // CHOICES strings are by construction the exact parse set
                if let Ok(value) = choices[index].parse::<T>() {
                    return Ok(Some(value));
                }
            }
            writeln!(output, "Please pick one of the listed options.")?;
        }
    }

    fn ask_u32<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
        label: &str,
        min: u32,
        max: u32,
        default: u32,
    ) -> Result<Option<u32>> {
        loop {
            write!(output, "{label} [{default}]: ")?;
            output.flush()?;

            let Some(line) = read_line(input)? else {
                return Ok(None);
            };
            if let Some(value) = parse_ranged_u32(&line, min, max, default) {
                return Ok(Some(value));
            }
            writeln!(output, "Enter a whole number between {min} and {max}.")?;
        }
    }

    fn ask_f64<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
        label: &str,
        min: f64,
        max: f64,
        default: f64,
    ) -> Result<Option<f64>> {
        loop {
            write!(output, "{label} [{default}]: ")?;
            output.flush()?;

            let Some(line) = read_line(input)? else {
                return Ok(None);
            };
            if let Some(value) = parse_ranged_f64(&line, min, max, default) {
                return Ok(Some(value));
            }
            writeln!(output, "Enter a number between {min} and {max}.")?;
        }
    }

    fn render_about<W: Write>(&self, output: &mut W) -> Result<()> {
        writeln!(output, "\n{CYAN}About{RESET}")?;
        writeln!(
            output,
            "Predicts whether a customer is likely to leave the service."
        )?;
        writeln!(
            output,
            "A pre-trained classifier scores six attributes: gender, tenure,"
        )?;
        writeln!(
            output,
            "monthly charges, total charges, internet service and contract type."
        )?;
        writeln!(
            output,
            "Continuous features are standardized with the scaler fitted at"
        )?;
        writeln!(output, "training time before every prediction.")?;
        if self.motif.is_some() {
            writeln!(output, "(motif animation asset loaded)")?;
        }
        Ok(())
    }
}

/// Read one line; `None` on EOF.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let n = input.read_line(&mut line)?;
    if n == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::prediction::{ChurnLabel, ChurnPrediction};

    #[test]
    fn test_parse_view() {
        assert_eq!(parse_view("1"), Some(View::Predict));
        assert_eq!(parse_view(" predict \n"), Some(View::Predict));
        assert_eq!(parse_view("About"), Some(View::About));
        assert_eq!(parse_view("q"), Some(View::Quit));
        assert_eq!(parse_view("settings"), None);
    }

    #[test]
    fn test_parse_choice_by_index_and_name() {
        let choices = InternetService::CHOICES;
        assert_eq!(parse_choice("2", &choices, 0), Some(1));
        assert_eq!(parse_choice("Fiber optic", &choices, 0), Some(1));
        assert_eq!(parse_choice("", &choices, 2), Some(2));
        assert_eq!(parse_choice("4", &choices, 0), None);
        assert_eq!(parse_choice("Satellite", &choices, 0), None);
    }

    #[test]
    fn test_parse_ranged_u32() {
        assert_eq!(parse_ranged_u32("0", 0, 72, 12), Some(0));
        assert_eq!(parse_ranged_u32("72", 0, 72, 12), Some(72));
        assert_eq!(parse_ranged_u32("", 0, 72, 12), Some(12));
        assert_eq!(parse_ranged_u32("73", 0, 72, 12), None);
        assert_eq!(parse_ranged_u32("-1", 0, 72, 12), None);
        assert_eq!(parse_ranged_u32("twelve", 0, 72, 12), None);
    }

    #[test]
    fn test_parse_ranged_f64() {
        assert_eq!(parse_ranged_f64("70.5", 0.0, 200.0, 70.0), Some(70.5));
        assert_eq!(parse_ranged_f64("0", 0.0, 200.0, 70.0), Some(0.0));
        assert_eq!(parse_ranged_f64("200", 0.0, 200.0, 70.0), Some(200.0));
        assert_eq!(parse_ranged_f64("", 0.0, 200.0, 70.0), Some(70.0));
        assert_eq!(parse_ranged_f64("200.01", 0.0, 200.0, 70.0), None);
        assert_eq!(parse_ranged_f64("NaN", 0.0, 200.0, 70.0), None);
    }

    #[test]
    fn test_banner_formats() {
        let high = ChurnPrediction::new(ChurnLabel::Churned, 83.256);
        let rendered = render_banner(&high);
        assert!(rendered.contains("High risk: 83.26%"));
        assert!(rendered.contains(RED));

        let low = ChurnPrediction::new(ChurnLabel::Retained, 12.0);
        let rendered = render_banner(&low);
        assert!(rendered.contains("Low risk: 12.00%"));
        assert!(rendered.contains(GREEN));
    }
}
