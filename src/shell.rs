// 🐚 Interactive Shell
// Collects birth date and gender, prints the pension summary, and loops
// until the user declines another calculation.

use crate::calculator::{evaluate_with, BirthInfo, EligibilityResult, Gender};
use crate::clock::Clock;
use crate::error::PensionError;
use crate::prompt::{LineReader, OptionSelector};
use crate::rules::PensionRules;
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::io::Write;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Prompt settings. The binary uses `ShellConfig::default()`; other values
/// are for callers embedding the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Lower bound shown in the birth-year prompt (a hint, not enforced)
    pub min_birth_year: i32,

    /// Answers that start another calculation (case-insensitive)
    pub affirmative: Vec<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            min_birth_year: 1950,
            affirmative: vec!["s".to_string(), "y".to_string()],
        }
    }
}

impl ShellConfig {
    pub fn is_affirmative(&self, answer: &str) -> bool {
        let answer = answer.trim().to_lowercase();
        self.affirmative.iter().any(|token| token.to_lowercase() == answer)
    }
}

/// Parse an integer field, reporting which field was malformed.
pub fn parse_integer(field: &'static str, input: &str) -> Result<i32, PensionError> {
    input.trim().parse().map_err(|_| PensionError::Parse {
        field,
        input: input.trim().to_string(),
    })
}

// ============================================================================
// SHELL
// ============================================================================

pub struct Shell<R, S, C, W> {
    reader: R,
    selector: S,
    clock: C,
    out: W,
    rules: PensionRules,
    config: ShellConfig,
}

impl<R: LineReader, S: OptionSelector, C: Clock, W: Write> Shell<R, S, C, W> {
    pub fn new(reader: R, selector: S, clock: C, out: W) -> Self {
        Shell {
            reader,
            selector,
            clock,
            out,
            rules: PensionRules::default(),
            config: ShellConfig::default(),
        }
    }

    /// Library entry point for embedding with another rule set; the binary
    /// always runs with the defaults.
    pub fn with_rules(mut self, rules: PensionRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_config(mut self, config: ShellConfig) -> Self {
        self.config = config;
        self
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Run calculations until the user says no or input ends.
    pub fn run(&mut self) -> Result<()> {
        let mut round = 0;

        loop {
            round += 1;
            log::debug!("starting calculation #{round}");

            if self.run_once()?.is_none() {
                break;
            }
            if !self.ask_repeat()? {
                break;
            }
        }

        writeln!(
            self.out,
            "✨ Gracias por usar nuestro sistema. ¡Que tengas un excelente día! ✨"
        )?;
        self.out.flush()?;
        Ok(())
    }

    /// One calculation. `None` when input ended before it completed.
    fn run_once(&mut self) -> Result<Option<()>> {
        writeln!(self.out, "🛠 Bienvenido al sistema de cálculo de pensión en Colombia 🛠")?;
        writeln!(self.out, "Por favor, ingresa tu información a continuación:")?;

        let today = self.clock.today();

        let year_prompt = format!(
            "📆 Ingresa tu año de nacimiento ({} - {}): ",
            self.config.min_birth_year,
            today.year()
        );
        let Some(year) = self.read_integer("año de nacimiento", &year_prompt)? else {
            return Ok(None);
        };
        let Some(month) =
            self.read_integer("mes de nacimiento", "📆 Ingresa tu mes de nacimiento (1 - 12): ")?
        else {
            return Ok(None);
        };
        let Some(day) =
            self.read_integer("día de nacimiento", "📆 Ingresa tu día de nacimiento (1 - 31): ")?
        else {
            return Ok(None);
        };

        self.out.flush()?;
        let Some(option) = self
            .selector
            .select("⚖ Selecciona tu género:", &Gender::menu_labels())?
        else {
            return Ok(None);
        };

        match self.calculate(year, month, day, option, today) {
            Ok(result) => self.print_summary(&result)?,
            Err(err) if err.is_recoverable() => {
                log::warn!("calculation rejected: {err}");
                writeln!(self.out, "\n❌ {err}")?;
            }
            Err(err) => return Err(err.into()),
        }

        Ok(Some(()))
    }

    fn calculate(
        &self,
        year: i32,
        month: i32,
        day: i32,
        option: usize,
        today: NaiveDate,
    ) -> Result<EligibilityResult, PensionError> {
        let gender = Gender::from_menu_index(option)?;
        let birth = BirthInfo::new(year, month, day)?;
        evaluate_with(&self.rules, birth.to_date(), gender, today)
    }

    /// Re-prompts until the line parses. `None` on end of input.
    fn read_integer(&mut self, field: &'static str, prompt: &str) -> Result<Option<i32>> {
        loop {
            self.out.flush()?;
            let Some(line) = self.reader.read_line(prompt)? else {
                return Ok(None);
            };

            match parse_integer(field, &line) {
                Ok(value) => return Ok(Some(value)),
                Err(err) => {
                    log::warn!("{err}");
                    writeln!(self.out, "⚠️ {err}. Intenta de nuevo.")?;
                }
            }
        }
    }

    fn ask_repeat(&mut self) -> Result<bool> {
        writeln!(self.out)?;
        self.out.flush()?;
        let answer = self
            .reader
            .read_line("🔄 ¿Deseas realizar otro cálculo? (s/n): ")?;

        Ok(answer.is_some_and(|answer| self.config.is_affirmative(&answer)))
    }

    fn print_summary(&mut self, result: &EligibilityResult) -> Result<()> {
        let verdict = if result.meets_requirements { "Sí 🎉" } else { "No ❌" };

        writeln!(self.out, "\n📌 Resumen de tu situación de pensión:")?;
        writeln!(
            self.out,
            "👉 Semanas cotizadas: {} (mínimo requerido: {})",
            result.contributed_weeks, result.required_weeks
        )?;
        writeln!(
            self.out,
            "🎂 Edad actual: {} años (edad de pensión: {})",
            result.current_age, result.required_age
        )?;
        writeln!(
            self.out,
            "📅 Fecha estimada en la que podrías pensionarte: {}",
            result.pension_date
        )?;
        writeln!(
            self.out,
            "✅ ¿Cumples con los requisitos para pensionarte? {verdict}"
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::prompt::LineSelector;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    struct ScriptedReader {
        lines: VecDeque<String>,
        prompts: Vec<String>,
    }

    impl ScriptedReader {
        fn new(lines: &[&str]) -> Self {
            ScriptedReader {
                lines: lines.iter().map(|l| l.to_string()).collect(),
                prompts: Vec::new(),
            }
        }
    }

    impl LineReader for ScriptedReader {
        fn read_line(&mut self, prompt: &str) -> Result<Option<String>, PensionError> {
            self.prompts.push(prompt.to_string());
            Ok(self.lines.pop_front())
        }
    }

    struct ScriptedSelector {
        choices: VecDeque<Option<usize>>,
    }

    impl ScriptedSelector {
        fn new(choices: &[Option<usize>]) -> Self {
            ScriptedSelector {
                choices: choices.iter().copied().collect(),
            }
        }
    }

    impl OptionSelector for ScriptedSelector {
        fn select(&mut self, _title: &str, options: &[&str]) -> Result<Option<usize>, PensionError> {
            assert_eq!(options, ["Hombre", "Mujer"]);
            Ok(self.choices.pop_front().flatten())
        }
    }

    fn today() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2024, 5, 16).unwrap())
    }

    fn run_session(
        lines: &[&str],
        choices: &[Option<usize>],
    ) -> (String, Vec<String>) {
        let mut shell = Shell::new(
            ScriptedReader::new(lines),
            ScriptedSelector::new(choices),
            today(),
            Vec::new(),
        );
        shell.run().unwrap();

        let output = String::from_utf8(shell.output().clone()).unwrap();
        let prompts = shell.reader.prompts.clone();
        (output, prompts)
    }

    #[test]
    fn test_single_calculation_male() {
        let (output, prompts) = run_session(&["1960", "5", "15", "n"], &[Some(1)]);

        assert!(output.contains("Bienvenido al sistema de cálculo de pensión"));
        assert!(output.contains("Semanas cotizadas: 2398 (mínimo requerido: 1300)"));
        assert!(output.contains("Edad actual: 64 años (edad de pensión: 62)"));
        assert!(output.contains("podrías pensionarte: 2022-05-15"));
        assert!(output.contains("¿Cumples con los requisitos para pensionarte? Sí 🎉"));
        assert!(output.ends_with("¡Que tengas un excelente día! ✨\n"));

        assert_eq!(prompts[0], "📆 Ingresa tu año de nacimiento (1950 - 2024): ");
        assert_eq!(prompts.len(), 4);
    }

    #[test]
    fn test_young_female_not_eligible() {
        let (output, _) = run_session(&["2000", "1", "1", "n"], &[Some(2)]);

        assert!(output.contains("podrías pensionarte: 2057-01-01"));
        assert!(output.contains("pensionarte? No ❌"));
    }

    #[test]
    fn test_malformed_number_reprompts() {
        let (output, prompts) = run_session(&["mil", "1960", "cinco", "5", "15", "n"], &[Some(1)]);

        assert!(output.contains("'mil' no es un número entero válido para el año de nacimiento"));
        assert!(output.contains("'cinco' no es un número entero válido para el mes de nacimiento"));
        assert!(output.contains("Semanas cotizadas: 2398"));
        assert_eq!(prompts.len(), 6);
    }

    #[test]
    fn test_out_of_hint_year_is_accepted() {
        let (output, _) = run_session(&["1940", "3", "3", "n"], &[Some(2)]);
        assert!(output.contains("podrías pensionarte: 1997-03-03"));
    }

    #[test]
    fn test_invalid_date_skips_summary() {
        let (output, _) = run_session(&["2023", "2", "30", "n"], &[Some(1)]);

        assert!(output.contains("❌ Fecha no válida: 2023-02-30"));
        assert!(!output.contains("Resumen"));
        assert!(output.contains("Gracias por usar nuestro sistema"));
    }

    #[test]
    fn test_future_birth_date_rejected() {
        let (output, _) = run_session(&["2030", "1", "1", "n"], &[Some(1)]);

        assert!(output.contains("posterior a hoy"));
        assert!(!output.contains("Resumen"));
    }

    #[test]
    fn test_repeat_runs_again() {
        let (output, _) = run_session(
            &["1960", "5", "15", "S", "2000", "1", "1", "no"],
            &[Some(1), Some(2)],
        );

        assert_eq!(output.matches("Resumen de tu situación").count(), 2);
        assert_eq!(output.matches("Bienvenido").count(), 2);
        assert_eq!(output.matches("Gracias por usar").count(), 1);
    }

    #[test]
    fn test_end_of_input_ends_cleanly() {
        let (output, _) = run_session(&["1960"], &[]);

        assert!(!output.contains("Resumen"));
        assert!(output.contains("Gracias por usar nuestro sistema"));
    }

    #[test]
    fn test_cancelled_menu_ends_cleanly() {
        let (output, prompts) = run_session(&["1960", "5", "15"], &[None]);

        assert!(!output.contains("Resumen"));
        assert!(output.contains("Gracias por usar nuestro sistema"));
        assert_eq!(prompts.len(), 3);
    }

    #[test]
    fn test_custom_rules_and_config() {
        let rules = PensionRules {
            male_pension_age: 65,
            ..PensionRules::default()
        };
        let config = ShellConfig {
            min_birth_year: 1900,
            ..ShellConfig::default()
        };
        let mut shell = Shell::new(
            ScriptedReader::new(&["1960", "5", "15", "n"]),
            ScriptedSelector::new(&[Some(1)]),
            today(),
            Vec::new(),
        )
        .with_rules(rules)
        .with_config(config);
        shell.run().unwrap();

        let output = String::from_utf8(shell.output().clone()).unwrap();
        assert!(output.contains("podrías pensionarte: 2025-05-15"));
        assert!(output.contains("pensionarte? No ❌"));
        assert!(shell.reader.prompts[0].contains("(1900 - 2024)"));
    }

    #[test]
    fn test_numbered_menu_reads_session_input() {
        let input = Rc::new(RefCell::new(ScriptedReader::new(&["1960", "5", "15", "1", "n"])));
        let selector = LineSelector::new(Rc::clone(&input), Vec::new());
        let mut shell = Shell::new(Rc::clone(&input), selector, today(), Vec::new());
        shell.run().unwrap();

        let output = String::from_utf8(shell.output().clone()).unwrap();
        assert!(output.contains("Semanas cotizadas: 2398"));
        assert!(output.contains("pensionarte? Sí 🎉"));

        let reader = input.borrow();
        assert_eq!(reader.prompts.len(), 5);
        assert_eq!(reader.prompts[3], "Opción (1-2): ");
    }

    #[test]
    fn test_affirmative_tokens() {
        let config = ShellConfig::default();
        assert!(config.is_affirmative("s"));
        assert!(config.is_affirmative(" S "));
        assert!(config.is_affirmative("y"));
        assert!(!config.is_affirmative("n"));
        assert!(!config.is_affirmative(""));
        assert!(!config.is_affirmative("si claro"));
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("año de nacimiento", " 1960 ").unwrap(), 1960);
        assert_eq!(parse_integer("día de nacimiento", "-3").unwrap(), -3);
        assert!(matches!(
            parse_integer("día de nacimiento", "3.5"),
            Err(PensionError::Parse { .. })
        ));
    }
}
