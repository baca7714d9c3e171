use crate::error::{Error, Result};
use crate::snapshot::{compare_weights, Snapshot, WeightTree};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

pub mod store;

/// external tool rendering the generated scripts
pub const DEFAULT_PLOT_COMMAND: &str = "gnuplot";

const WEIGHTS: &str = "weights";
const ADJUSTMENTS: &str = "adjustments";

/// The Analyser follows a Neuron or a Network during training.
///
/// Every recorded iteration appends one "<iteration> <value>" line to a flat
/// file per weight (bias included, as last weight of each neuron):
/// `weights.dat<L><N><W>` holds the weight value and
/// `adjustments.dat<L><N><W>` the change since the previous record. A single
/// neuron only uses the weight index (`weights.dat<W>`).
///
/// The subject is passed to each call instead of being stored, so that the
/// trainer can keep mutating it between two records.
pub struct Analyser {
    output_dir: PathBuf,
    subject_name: &'static str,
    previous_weights: WeightTree, // snapshot taken at the last record
    iteration: u64,               // last recorded iteration
    plot_command: Option<String>,
}

impl Analyser {
    /// Start analysing 'subject', writing into 'output_dir'.
    ///
    /// With 'overwrite' false and data already present, the iteration
    /// counter resumes from the last line of the first weights file and
    /// nothing is written. Otherwise old data files are removed and the
    /// current weights are recorded as iteration 0.
    pub fn new<S: Snapshot + ?Sized>(
        subject: &S,
        output_dir: impl AsRef<Path>,
        overwrite: bool,
    ) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)?;

        let mut analyser = Analyser {
            output_dir,
            subject_name: subject.subject_name(),
            previous_weights: subject.snapshot(),
            iteration: 0,
            plot_command: Some(DEFAULT_PLOT_COMMAND.to_string()),
        };

        match analyser.resume_point(overwrite)? {
            Some(iteration) => {
                analyser.iteration = iteration;
                info!(
                    dir = ?analyser.output_dir,
                    iteration, "analyser resuming from existing data"
                );
            }
            None => {
                analyser.clear_data_files()?;
                let zeros = analyser.previous_weights.zeros_like();
                let weights = analyser.previous_weights.clone();
                analyser.write_iteration(0, &weights, &zeros)?;
                info!(dir = ?analyser.output_dir, "analyser started");
            }
        }

        Ok(analyser)
    }

    /// replace the plotting tool; None only writes the scripts
    pub fn with_plot_command(mut self, plot_command: Option<String>) -> Self {
        self.plot_command = plot_command;
        self
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn previous_weights(&self) -> &WeightTree {
        &self.previous_weights
    }

    /// Record the current weights of 'subject' and their change since the
    /// previous record. Without an explicit iteration the counter advances
    /// by one. Returns the iteration written.
    pub fn record<S: Snapshot + ?Sized>(
        &mut self,
        subject: &S,
        iteration: Option<u64>,
    ) -> Result<u64> {
        let current = subject.snapshot();
        let adjustments = compare_weights(&self.previous_weights, &current)?;
        let iteration = iteration.unwrap_or(self.iteration + 1);

        self.write_iteration(iteration, &current, &adjustments)?;
        self.previous_weights = current;
        self.iteration = iteration;

        debug!(iteration, "weights recorded");
        Ok(iteration)
    }

    /// Write `weights.p` and `adjustments.p` for the recorded data and run the
    /// plotting tool on each of them. The scripts only depend on the shape of
    /// the subject; a missing or failing tool is reported and ignored.
    pub fn generate_plots(&self) -> Result<()> {
        for (kind, label) in [(WEIGHTS, "Weights"), (ADJUSTMENTS, "Adjustments")] {
            let script_name = format!("{kind}.p");
            fs::write(
                self.output_dir.join(&script_name),
                self.plot_script(kind, label),
            )?;

            if let Some(command) = &self.plot_command {
                self.run_plot_command(command, &script_name);
            }
        }
        Ok(())
    }

    /// gnuplot script drawing one line per data file of 'kind'
    fn plot_script(&self, kind: &str, label: &str) -> String {
        let mut script = String::new();
        script.push_str("set terminal png size 1280,960\n");
        script.push_str(&format!("set output '{kind}.png'\n"));
        script.push_str(&format!(
            "set title '{} {label} Over Iterations'\n",
            self.subject_name
        ));
        script.push_str("set xlabel 'Iteration'\n");
        script.push_str(&format!("set ylabel '{label}'\n"));
        script.push_str("set key outside right\n");

        let entries = self
            .previous_weights
            .leaves()
            .iter()
            .map(|(path, _)| {
                format!(
                    "'{}' title '{}' with linespoints",
                    data_file_name(kind, path),
                    index_suffix(path)
                )
            })
            .collect::<Vec<String>>();
        script.push_str("plot ");
        script.push_str(&entries.join(", \\\n     "));
        script.push('\n');
        script
    }

    fn run_plot_command(&self, command: &str, script_name: &str) {
        match Command::new(command)
            .arg(script_name)
            .current_dir(&self.output_dir)
            .status()
        {
            Ok(status) if status.success() => {
                info!(script = script_name, "plot generated");
            }
            Ok(status) => {
                warn!(script = script_name, %status, "plotting tool failed");
            }
            Err(e) => {
                warn!(script = script_name, command, error = %e, "cannot run plotting tool");
            }
        }
    }

    /// iteration to resume from, None when starting over
    fn resume_point(&self, overwrite: bool) -> Result<Option<u64>> {
        if overwrite {
            return Ok(None);
        }

        let first = match self.previous_weights.leaves().into_iter().next() {
            Some((path, _)) => self.output_dir.join(data_file_name(WEIGHTS, &path)),
            None => return Ok(None),
        };
        if !store::is_file(&first) {
            return Ok(None);
        }

        let line = store::read_last_line(&first)?.unwrap_or_default();
        let iteration = line
            .split(' ')
            .next()
            .and_then(|token| token.trim().parse::<u64>().ok())
            .ok_or_else(|| Error::CorruptLog {
                path: first.clone(),
                line: line.clone(),
            })?;

        Ok(Some(iteration))
    }

    /// remove every weights/adjustments data file left in the directory
    fn clear_data_files(&self) -> Result<()> {
        for entry in fs::read_dir(&self.output_dir)? {
            let path = entry?.path();
            let is_data_file = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| {
                    name.starts_with(&format!("{WEIGHTS}.dat"))
                        || name.starts_with(&format!("{ADJUSTMENTS}.dat"))
                })
                .unwrap_or(false);
            if is_data_file && store::is_file(&path) {
                store::unlink(&path)?;
            }
        }
        Ok(())
    }

    fn write_iteration(
        &self,
        iteration: u64,
        weights: &WeightTree,
        adjustments: &WeightTree,
    ) -> Result<()> {
        for (kind, tree) in [(WEIGHTS, weights), (ADJUSTMENTS, adjustments)] {
            for (path, value) in tree.leaves() {
                store::append_line(
                    self.output_dir.join(data_file_name(kind, &path)),
                    &format!("{iteration} {value}"),
                )?;
            }
        }
        Ok(())
    }
}

fn index_suffix(path: &[usize]) -> String {
    path.iter().map(|i| i.to_string()).collect()
}

/// e.g. "weights.dat012" for layer 0, neuron 1, weight 2
fn data_file_name(kind: &str, path: &[usize]) -> String {
    format!("{kind}.dat{}", index_suffix(path))
}
