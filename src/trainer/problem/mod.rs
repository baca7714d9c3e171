use crate::error::{Error, Result};

/// A toy classification task: a finite input domain and a closed-form rule
/// giving the expected output of each input.
pub trait Problem {
    fn name(&self) -> &str;

    /// every input vector the problem is trained and tested on
    fn domain(&self) -> Vec<Vec<f64>>;

    /// 1 when the rule holds for 'inputs', the problem's false value otherwise
    fn expected(&self, inputs: &[f64]) -> f64;
}

impl<P: Problem + ?Sized> Problem for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn domain(&self) -> Vec<Vec<f64>> {
        (**self).domain()
    }

    fn expected(&self, inputs: &[f64]) -> f64 {
        (**self).expected(inputs)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    Or,
    And,
    Xor,
}

/// Two-input logic gate over {0,1}x{0,1}
#[derive(Clone, Copy, Debug)]
pub struct LogicGate {
    gate: Gate,
    false_value: f64,
}

impl LogicGate {
    pub fn new(gate: Gate, false_value: f64) -> Self {
        LogicGate { gate, false_value }
    }

    pub fn or(false_value: f64) -> Self {
        Self::new(Gate::Or, false_value)
    }

    pub fn and(false_value: f64) -> Self {
        Self::new(Gate::And, false_value)
    }

    pub fn xor(false_value: f64) -> Self {
        Self::new(Gate::Xor, false_value)
    }
}

impl Problem for LogicGate {
    fn name(&self) -> &str {
        match self.gate {
            Gate::Or => "or",
            Gate::And => "and",
            Gate::Xor => "xor",
        }
    }

    fn domain(&self) -> Vec<Vec<f64>> {
        let mut domain = Vec::with_capacity(4);
        for x in 0..2 {
            for y in 0..2 {
                domain.push(vec![x as f64, y as f64]);
            }
        }
        domain
    }

    fn expected(&self, inputs: &[f64]) -> f64 {
        let x = inputs.first().copied().unwrap_or(0.0) > 0.5;
        let y = inputs.get(1).copied().unwrap_or(0.0) > 0.5;
        let result = match self.gate {
            Gate::Or => x || y,
            Gate::And => x && y,
            Gate::Xor => x != y,
        };
        if result {
            1.0
        } else {
            self.false_value
        }
    }
}

/// Points (x, y) with integer coordinates in [0, max]x[0, max]; true when the
/// point lies strictly above the line y = x
#[derive(Clone, Copy, Debug)]
pub struct StraightLine {
    max: u32,
    false_value: f64,
}

impl StraightLine {
    pub fn new(max: u32, false_value: f64) -> Self {
        StraightLine { max, false_value }
    }
}

impl Problem for StraightLine {
    fn name(&self) -> &str {
        "line"
    }

    fn domain(&self) -> Vec<Vec<f64>> {
        let mut domain = Vec::new();
        for x in 0..=self.max {
            for y in 0..=self.max {
                domain.push(vec![x as f64, y as f64]);
            }
        }
        domain
    }

    fn expected(&self, inputs: &[f64]) -> f64 {
        match inputs {
            [x, y, ..] if y > x => 1.0,
            _ => self.false_value,
        }
    }
}

/// build a problem from its name ("or", "and", "xor", "line")
pub fn problem_from_name(name: &str, false_value: f64, line_max: u32) -> Result<Box<dyn Problem>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "or" => Ok(Box::new(LogicGate::or(false_value))),
        "and" => Ok(Box::new(LogicGate::and(false_value))),
        "xor" => Ok(Box::new(LogicGate::xor(false_value))),
        "line" => Ok(Box::new(StraightLine::new(line_max, false_value))),
        _ => Err(Error::UnknownProblem(name.to_string())),
    }
}
