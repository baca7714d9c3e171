use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Value returned by a Step activation when its input is not positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepConvention {
    /// 1 / 0
    ZeroOne,
    /// 1 / -1
    Bipolar,
}

/// Nonlinearity applied by a Neuron to its weighted sum.
///
/// Sigmoid also drives the neuron's effective learning rate: every time a
/// sigmoid neuron computes an output, the rate used by its next update becomes
/// `max(derivative_from_output(output), default rate)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    Step(StepConvention),
    Sigmoid,
}

impl Default for Activation {
    fn default() -> Self {
        Activation::Sigmoid
    }
}

impl Activation {
    /// apply the activation to the weighted sum of a neuron
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Activation::Step(convention) => {
                if x > 0.0 {
                    1.0
                } else {
                    Self::step_low(*convention)
                }
            }
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }

    /// slope of the activation expressed through its own output
    /// (a step has no gradient)
    pub fn derivative_from_output(&self, output: f64) -> f64 {
        match self {
            Activation::Step(_) => 0.0,
            Activation::Sigmoid => output * (1.0 - output),
        }
    }

    /// output representing "false" for this activation
    pub fn false_value(&self) -> f64 {
        match self {
            Activation::Step(convention) => Self::step_low(*convention),
            Activation::Sigmoid => 0.0,
        }
    }

    /// whether computing an output changes the neuron's learning rate
    pub fn adapts_learning_rate(&self) -> bool {
        matches!(self, Activation::Sigmoid)
    }

    fn step_low(convention: StepConvention) -> f64 {
        match convention {
            StepConvention::ZeroOne => 0.0,
            StepConvention::Bipolar => -1.0,
        }
    }
}

impl FromStr for Activation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "step" => Ok(Activation::Step(StepConvention::ZeroOne)),
            "step-bipolar" => Ok(Activation::Step(StepConvention::Bipolar)),
            "sigmoid" => Ok(Activation::Sigmoid),
            _ => Err(Error::UnsupportedActivation(s.to_string())),
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Activation::Step(StepConvention::ZeroOne) => write!(f, "step"),
            Activation::Step(StepConvention::Bipolar) => write!(f, "step-bipolar"),
            Activation::Sigmoid => write!(f, "sigmoid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_step_conventions() {
        let zero_one = Activation::Step(StepConvention::ZeroOne);
        let bipolar = Activation::Step(StepConvention::Bipolar);

        assert_eq!(zero_one.apply(0.3), 1.0);
        assert_eq!(zero_one.apply(0.0), 0.0);
        assert_eq!(zero_one.apply(-2.0), 0.0);
        assert_eq!(bipolar.apply(0.3), 1.0);
        assert_eq!(bipolar.apply(0.0), -1.0);
        assert_eq!(bipolar.false_value(), -1.0);
        assert_eq!(zero_one.false_value(), 0.0);
    }

    #[test]
    fn test_sigmoid() {
        let sigmoid = Activation::Sigmoid;
        assert_relative_eq!(sigmoid.apply(0.0), 0.5);
        assert_relative_eq!(sigmoid.apply(2.0), 1.0 / (1.0 + (-2.0f64).exp()));
        assert_relative_eq!(sigmoid.derivative_from_output(0.5), 0.25);
        assert_eq!(sigmoid.apply(-1000.0), 0.0);
    }

    #[test]
    fn test_parse_round_trip() {
        for name in ["step", "step-bipolar", "sigmoid"] {
            let activation: Activation = name.parse().unwrap();
            assert_eq!(activation.to_string(), name);
        }
    }

    #[test]
    fn test_parse_unsupported() {
        let err = "relu".parse::<Activation>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedActivation(name) if name == "relu"));
    }
}
