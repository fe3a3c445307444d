/*!
Control the appearance of simulation result data

# Working with [`ResultsBuilder`]

## Examples

Creating a [`ResultsTable`] after running a simulation group:

```
use hashpower_sim::prelude::*;

let sim = SimulationBuilder::new()
    .add_strategy(FixedPool::new())
    .add_strategy(RoundRobin::new(4))
    .hashpower(1000)
    .samples(20)
    .build()
    .unwrap();

let results = sim
    .run_all()
    .threshold(u64::MAX / 4 * 3) // Only count minimums above this value
    .all()                        // Include every summary column
    .format(Format::CSV)          // Output results as CSV
    .build();

println!("{}", results);
```

# Submission Logs

[`ResultsBuilder::submission_log`] lists, for every strategy, each sample that
produced at least one candidate above the threshold along with how far above
the threshold each of those candidates finished.
*/

use std::{collections::BTreeSet, fmt::Display};

use crate::simulation::StrategyOutput;

/// Floating point precision of results data.
pub const FLOAT_PRECISION_DIGITS: usize = 6;

/// Reporting threshold used unless configured otherwise.
pub const DEFAULT_THRESHOLD: u64 = 0xffff_0000_0000_0000;

/// Builder for [`ResultsTable`]. Typically produced by running a
/// [`SimulationGroup`](crate::simulation::SimulationGroup).
#[derive(Debug, Clone)]
pub struct ResultsBuilder {
    columns: BTreeSet<Column>,
    data: Vec<StrategyOutput>,
    format: Format,
    threshold: u64,
}

/// Describes the appearance of a [`ResultsTable`] table as given by its
/// [`Display`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// Comma-separated, without extra whitespace.
    CSV,
    /// Human-readable.
    #[default]
    PrettyPrint,
}

impl ResultsBuilder {
    /// Create a new [`ResultsBuilder`].
    pub(crate) fn new(data: Vec<StrategyOutput>) -> Self {
        Self {
            data,
            columns: BTreeSet::default(),
            format: Format::default(),
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Include every summary column.
    pub fn all(self) -> Self {
        self.hashpower()
            .rounds()
            .qualifying_runs()
            .submissions()
            .mean_excess()
            .best_minimum()
    }

    /// Only candidates whose final minimum is strictly above `threshold` are
    /// counted as submissions (default [`DEFAULT_THRESHOLD`]).
    pub fn threshold(mut self, threshold: u64) -> Self {
        self.threshold = threshold;

        self
    }

    /// Specify the [`Format`] of the results table.
    pub fn format(mut self, format: Format) -> Self {
        self.format = format;

        self
    }

    /// Include the "Hashpower" column in the results table.
    pub fn hashpower(mut self) -> Self {
        self.columns.insert(Column::Hashpower);

        self
    }

    /// Include the "Rounds" column in the results table.
    pub fn rounds(mut self) -> Self {
        self.columns.insert(Column::Rounds);

        self
    }

    /// Include the "Qualifying Runs" column: samples with at least one
    /// submission.
    pub fn qualifying_runs(mut self) -> Self {
        self.columns.insert(Column::QualifyingRuns);

        self
    }

    /// Include the "Submissions" column: candidates above the threshold,
    /// across all samples.
    pub fn submissions(mut self) -> Self {
        self.columns.insert(Column::Submissions);

        self
    }

    /// Include the "Mean Excess" column: the average amount by which
    /// submissions finished above the threshold.
    pub fn mean_excess(mut self) -> Self {
        self.columns.insert(Column::MeanExcess);

        self
    }

    /// Include the "Best Minimum" column: the highest final minimum of any
    /// candidate in any sample, whether or not it cleared the threshold.
    pub fn best_minimum(mut self) -> Self {
        self.columns.insert(Column::BestMinimum);

        self
    }

    /// Extract the raw [`StrategyOutput`] data from this [`ResultsBuilder`].
    /// Useful for running custom statistical analysis.
    ///
    /// # Ordering
    /// Strategies appear in the order they were added to the
    /// [`SimulationBuilder`](crate::simulation::SimulationBuilder).
    pub fn data(self) -> Vec<StrategyOutput> {
        self.data
    }

    /// Returns the per-sample submission log of every strategy.
    pub fn submission_log(&self) -> SubmissionLog<'_> {
        SubmissionLog {
            data: &self.data,
            threshold: self.threshold,
        }
    }

    /// Create new [`ResultsTable`].
    pub fn build(self) -> ResultsTable {
        let ResultsBuilder { mut columns, data, format, threshold } = self;

        columns.insert(Column::Strategy);
        columns.insert(Column::Samples);

        let columns = Vec::from_iter(columns);
        let rows = data
            .iter()
            .map(|output| {
                let tally = Tally::of(output, threshold);
                columns
                    .iter()
                    .map(|col_type| col_type.get_value(output, &tally))
                    .collect()
            })
            .collect();

        ResultsTable { columns, format, rows }
    }
}

/// Formatted results from the completion of a
/// [`SimulationGroup`](crate::simulation::SimulationGroup). The results table
/// is given by the struct's [`Display`] implementation, as specified by
/// its [`Format`].
pub struct ResultsTable {
    columns: Vec<Column>,
    format: Format,
    rows: Vec<Vec<ColumnValue>>,
}

impl ResultsTable {
    const SEPARATOR_VERTICAL: char = '|';
    const SEPARATOR_HORIZONTAL: char = '-';

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn set_format(&mut self, format: Format) {
        self.format = format;
    }
}

impl Display for ResultsTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let titles: Vec<_> =
            self.columns.iter().map(|col_type| col_type.to_string()).collect();

        match self.format {
            Format::CSV => {
                write!(f, "{}", titles.join(","))?;

                for row in self.rows.iter() {
                    writeln!(f)?;

                    let row: Vec<_> =
                        row.iter().map(|val| val.to_string()).collect();

                    write!(f, "{}", row.join(","))?;
                }
            }
            Format::PrettyPrint => {
                let mut text_widths: Vec<_> =
                    titles.iter().map(|title| title.len()).collect();

                for row in self.rows.iter() {
                    for (i, val) in row.iter().enumerate() {
                        let val = val.to_string();
                        text_widths[i] = text_widths[i].max(val.len());
                    }
                }

                for (i, title) in titles.into_iter().enumerate() {
                    write!(
                        f,
                        " {:1$} {2}",
                        title,
                        text_widths[i],
                        Self::SEPARATOR_VERTICAL
                    )?;
                }
                writeln!(f)?;

                let total_width = text_widths.iter().map(|x| x + 3).sum();
                for _ in 0..total_width {
                    write!(f, "{}", Self::SEPARATOR_HORIZONTAL)?;
                }

                for row in self.rows.iter() {
                    writeln!(f)?;

                    for (i, val) in row.iter().enumerate() {
                        write!(
                            f,
                            " {:1$} {2}",
                            val.to_string(),
                            text_widths[i],
                            Self::SEPARATOR_VERTICAL
                        )?;
                    }
                }
            }
        }

        Ok(())
    }
}

/// Per-sample listing of the candidates which finished above the reporting
/// threshold, given by its [`Display`] implementation.
///
/// Each qualifying sample is written as `sample;excess;excess...`, where
/// `excess` is a candidate's final minimum minus the threshold.
pub struct SubmissionLog<'a> {
    data: &'a [StrategyOutput],
    threshold: u64,
}

impl SubmissionLog<'_> {
    const UNDERLINE: &'static str = "=====================";
}

impl Display for SubmissionLog<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, output) in self.data.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}\n{}", output.name(), Self::UNDERLINE)?;

            let mut found = false;
            for sample in output.samples.iter() {
                let mut excess = sample
                    .candidates
                    .iter()
                    .filter(|c| c.minimum() > self.threshold)
                    .map(|c| c.minimum() - self.threshold)
                    .peekable();

                if excess.peek().is_none() {
                    continue;
                }
                found = true;

                write!(f, "\n{}", sample.sample)?;
                for value in excess {
                    write!(f, ";{}", value)?;
                }
            }

            if !found {
                write!(f, "\nNo candidates above threshold found")?;
            }
        }

        Ok(())
    }
}

/// Counts gathered from every sample of one strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    qualifying_runs: usize,
    submissions: usize,
    excess_sum: u128,
    best_minimum: Option<u64>,
}

impl Tally {
    fn of(output: &StrategyOutput, threshold: u64) -> Self {
        let mut tally = Self::default();

        for sample in output.samples.iter() {
            let mut qualified = false;
            for candidate in sample.candidates.iter() {
                let minimum = candidate.minimum();
                if minimum > threshold {
                    qualified = true;
                    tally.submissions += 1;
                    tally.excess_sum += (minimum - threshold) as u128;
                }
                if tally.best_minimum.map_or(true, |best| minimum > best) {
                    tally.best_minimum = Some(minimum);
                }
            }

            if qualified {
                tally.qualifying_runs += 1;
            }
        }

        tally
    }

    fn mean_excess(&self) -> Option<f64> {
        (self.submissions > 0)
            .then(|| self.excess_sum as f64 / self.submissions as f64)
    }
}

/// Type of column that can appear in a data table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Column {
    // Variant order determines the order of columns in results tables:
    // https://doc.rust-lang.org/stable/std/cmp/trait.PartialOrd.html#derivable
    Strategy,
    Hashpower,
    Rounds,
    Samples,
    QualifyingRuns,
    Submissions,
    MeanExcess,
    BestMinimum,
}

/// Value which corresponds to a [`Column`].
#[derive(Debug, Clone)]
enum ColumnValue {
    Text(String),
    Count(usize),
    Float(f64),
    Score(u64),
    Missing,
}

impl Column {
    fn get_value(&self, output: &StrategyOutput, tally: &Tally) -> ColumnValue {
        match &self {
            Self::Strategy => ColumnValue::Text(output.name()),
            Self::Hashpower => ColumnValue::Count(output.budget.hashpower),
            Self::Rounds => ColumnValue::Count(output.budget.rounds),
            Self::Samples => ColumnValue::Count(output.samples.len()),
            Self::QualifyingRuns => ColumnValue::Count(tally.qualifying_runs),
            Self::Submissions => ColumnValue::Count(tally.submissions),
            Self::MeanExcess => tally
                .mean_excess()
                .map_or(ColumnValue::Missing, ColumnValue::Float),
            Self::BestMinimum => tally
                .best_minimum
                .map_or(ColumnValue::Missing, ColumnValue::Score),
        }
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            Self::Strategy => write!(f, "Strategy"),
            Self::Hashpower => write!(f, "Hashpower"),
            Self::Rounds => write!(f, "Rounds"),
            Self::Samples => write!(f, "Samples"),
            Self::QualifyingRuns => write!(f, "Qualifying Runs"),
            Self::Submissions => write!(f, "Submissions"),
            Self::MeanExcess => write!(f, "Mean Excess"),
            Self::BestMinimum => write!(f, "Best Minimum"),
        }
    }
}

impl Display for ColumnValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            Self::Text(text) => write!(f, "{}", text),
            Self::Count(count) => write!(f, "{}", count),
            Self::Float(value) => {
                write!(f, "{:.1$}", value, FLOAT_PRECISION_DIGITS)
            }
            Self::Score(score) => write!(f, "{:#018x}", score),
            Self::Missing => write!(f, "-"),
        }
    }
}
