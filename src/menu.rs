//! Console menu driving a `Session`.
//!
//! The console is generic over its input and output so the whole loop can be
//! exercised in tests with in-memory buffers. Operation errors are printed and
//! the loop continues; only I/O failures on the console itself end it early.

use crate::config::{SCHOOL_GENDER_COLUMN, TOP_REGIONS_LIMIT};
use crate::matrix::ServiceMatrix;
use crate::queries::{most_appliances, quality_of_life_index, total_for_category};
use crate::session::Session;
use crate::summary::{school_gender_shares, score_distribution, top_regions_by_mean};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    LoadData,
    GenderDistribution,
    TopRegions,
    ScoreDistribution,
    BuildMatrix,
    MostAppliances,
    CountCategory,
    QualityOfLife,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 9] = [
        MenuOption::LoadData,
        MenuOption::GenderDistribution,
        MenuOption::TopRegions,
        MenuOption::ScoreDistribution,
        MenuOption::BuildMatrix,
        MenuOption::MostAppliances,
        MenuOption::CountCategory,
        MenuOption::QualityOfLife,
        MenuOption::Exit,
    ];

    /// Parse the option number typed at the prompt.
    pub fn parse(raw: &str) -> Option<Self> {
        let number: usize = raw.trim().parse().ok()?;
        Self::ALL.get(number.checked_sub(1)?).copied()
    }

    pub fn number(&self) -> usize {
        Self::ALL
            .iter()
            .position(|option| option == self)
            .map_or(0, |idx| idx + 1)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::LoadData => "Load data from the Saber 11 tests calendar A 2020 in Colombia.",
            MenuOption::GenderDistribution => {
                "Check the distribution of students in different genders of schools."
            }
            MenuOption::TopRegions => {
                "Check the top 10 departments in the Saber 11 tests in a given category."
            }
            MenuOption::ScoreDistribution => {
                "Check the distribution of scores by category in the Saber 11 tests."
            }
            MenuOption::BuildMatrix => {
                "Construct the matrix of Departments vs. Number of households that have a given appliance/service/device."
            }
            MenuOption::MostAppliances => "Check the department with the highest number of appliances.",
            MenuOption::CountCategory => {
                "Check the number of students in the country who have a given appliance/service/device."
            }
            MenuOption::QualityOfLife => "Check the Quality of Life Index of a given department.",
            MenuOption::Exit => "Exit.",
        }
    }
}

/// Menu loop over arbitrary line input and text output.
pub struct Console<R, W> {
    input: R,
    output: W,
    session: Session,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, session: Session) -> Self {
        Self {
            input,
            output,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.show_menu()?;
            let Some(line) = self.prompt("Please select an option: ")? else {
                return Ok(());
            };
            let Some(option) = MenuOption::parse(&line) else {
                writeln!(self.output, "Please select a valid option.")?;
                continue;
            };
            if option == MenuOption::Exit {
                return Ok(());
            }
            if let Err(err) = self.execute(option) {
                writeln!(self.output, "Error: {err:#}")?;
            }
        }
    }

    fn show_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\nOptions")?;
        for option in MenuOption::ALL {
            writeln!(self.output, "{}. {}", option.number(), option.label())?;
        }
        Ok(())
    }

    /// Print `message` and read one trimmed line; `None` on end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_required(&mut self, message: &str) -> Result<String> {
        self.prompt(message)?
            .ok_or_else(|| anyhow::anyhow!("input ended before a value was entered"))
    }

    fn execute(&mut self, option: MenuOption) -> Result<()> {
        match option {
            MenuOption::LoadData => self.load_data(),
            MenuOption::GenderDistribution => self.gender_distribution(),
            MenuOption::TopRegions => self.top_regions(),
            MenuOption::ScoreDistribution => self.score_distribution(),
            MenuOption::BuildMatrix => self.build_matrix(),
            MenuOption::MostAppliances => self.most_appliances(),
            MenuOption::CountCategory => self.count_category(),
            MenuOption::QualityOfLife => self.quality_of_life(),
            MenuOption::Exit => Ok(()),
        }
    }

    fn load_data(&mut self) -> Result<()> {
        let file = self.prompt_required(
            "Please enter the name of the CSV file with the information of the Saber 11 tests: ",
        )?;
        let dataset = self.session.load(&PathBuf::from(file))?;
        writeln!(
            self.output,
            "Loaded {} records from {}.",
            dataset.len(),
            dataset
                .source()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        )?;
        if dataset.skipped_rows() > 0 {
            writeln!(
                self.output,
                "Skipped {} rows without a department.",
                dataset.skipped_rows()
            )?;
        }
        Ok(())
    }

    fn gender_distribution(&mut self) -> Result<()> {
        let shares = school_gender_shares(self.session.dataset()?.records(), SCHOOL_GENDER_COLUMN)?;
        writeln!(self.output, "Percentage distribution by school gender:")?;
        for share in shares {
            writeln!(
                self.output,
                "  {:<12} {:>8} {:>7.2}%",
                share.label,
                share.count,
                share.share * 100.0
            )?;
        }
        Ok(())
    }

    fn top_regions(&mut self) -> Result<()> {
        let category =
            self.prompt_required("Enter the exam category for which you want to know the top 10: ")?;
        let ranked = top_regions_by_mean(
            self.session.dataset()?.records(),
            &category,
            TOP_REGIONS_LIMIT,
        )?;
        writeln!(
            self.output,
            "Top {} departments with the highest score in {category}:",
            ranked.len()
        )?;
        for (position, entry) in ranked.iter().enumerate() {
            writeln!(
                self.output,
                "  {:>2}. {:<24} {:>8.2}",
                position + 1,
                entry.region,
                entry.mean
            )?;
        }
        Ok(())
    }

    fn score_distribution(&mut self) -> Result<()> {
        let columns = self.session.settings().score_columns.clone();
        let summaries = score_distribution(self.session.dataset()?.records(), &columns)?;
        writeln!(self.output, "Score distribution by evaluation category:")?;
        writeln!(
            self.output,
            "  {:<16} {:>8} {:>8} {:>8} {:>8} {:>8}",
            "category", "min", "q1", "median", "q3", "max"
        )?;
        for summary in summaries {
            writeln!(
                self.output,
                "  {:<16} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2}",
                summary.column, summary.min, summary.q1, summary.median, summary.q3, summary.max
            )?;
        }
        Ok(())
    }

    fn build_matrix(&mut self) -> Result<()> {
        let matrix = self.session.build_matrix()?;
        writeln!(
            self.output,
            "The assembled matrix of Department vs. Number of households with a service/appliance/device is:"
        )?;
        write_matrix(&mut self.output, matrix)
    }

    fn most_appliances(&mut self) -> Result<()> {
        let region = most_appliances(self.session.matrix()?)?;
        writeln!(
            self.output,
            "The department with the highest number of appliances is {region}"
        )?;
        Ok(())
    }

    fn count_category(&mut self) -> Result<()> {
        self.session.matrix()?;
        let device = self.prompt_required(
            "Enter the appliance/service/device for which you want to obtain the total count: ",
        )?;
        let total = total_for_category(self.session.matrix()?, &device)?;
        writeln!(
            self.output,
            "There are {total} people with the appliance/service/device {device} in the country."
        )?;
        Ok(())
    }

    fn quality_of_life(&mut self) -> Result<()> {
        self.session.matrix()?;
        let region = self.prompt_required(
            "Enter the department for which you want to know the Quality of Life Index: ",
        )?;
        let index = quality_of_life_index(self.session.matrix()?, &region)?;
        writeln!(
            self.output,
            "The Quality of Life Index (ICV) for the department {region} is {index}"
        )?;
        Ok(())
    }
}

/// Render the matrix as an aligned text table with a header row.
pub fn write_matrix<W: Write>(output: &mut W, matrix: &ServiceMatrix) -> Result<()> {
    let width = matrix
        .regions()
        .names()
        .iter()
        .map(|r| r.as_str().chars().count())
        .max()
        .unwrap_or(0)
        .max("department".len());

    write!(output, "{:<width$}", "department")?;
    for category in matrix.categories().names() {
        write!(output, " | {category}")?;
    }
    writeln!(output)?;

    for (idx, region) in matrix.regions().iter() {
        write!(output, "{:<width$}", region.as_str())?;
        for (category, cell) in matrix.categories().names().iter().zip(&matrix.rows()[idx]) {
            let column_width = category.as_str().chars().count();
            write!(output, " | {cell:>column_width$}")?;
        }
        writeln!(output)?;
    }
    Ok(())
}
