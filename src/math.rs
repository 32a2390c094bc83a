//! Reducer module
//!
//! Pure folds over an ordered sequence of integers. Every reducer is total:
//! integer overflow wraps around and division follows IEEE-754, so no input
//! can make a reducer fail.

use serde::{Serialize, Serializer};

/// Additive fold starting at 0
pub fn sum(numbers: &[i64]) -> i64 {
    numbers.iter().fold(0, |acc, &n| acc.wrapping_add(n))
}

/// First element seeds the total, every later element is subtracted
pub fn sub(numbers: &[i64]) -> i64 {
    seeded_fold(numbers, i64::wrapping_sub)
}

/// Multiplicative fold starting at 1
pub fn mul(numbers: &[i64]) -> i64 {
    numbers.iter().fold(1, |acc, &n| acc.wrapping_mul(n))
}

/// First element seeds the quotient, every later element divides it
#[allow(clippy::cast_precision_loss)]
pub fn div(numbers: &[i64]) -> f64 {
    match numbers.split_first() {
        Some((&first, rest)) => rest.iter().fold(first as f64, |acc, &n| acc / n as f64),
        None => 0.0,
    }
}

pub fn and(numbers: &[i64]) -> i64 {
    seeded_fold(numbers, |acc, n| acc & n)
}

pub fn or(numbers: &[i64]) -> i64 {
    seeded_fold(numbers, |acc, n| acc | n)
}

pub fn xor(numbers: &[i64]) -> i64 {
    seeded_fold(numbers, |acc, n| acc ^ n)
}

/// Fold seeded with the first element; the empty sequence yields 0
fn seeded_fold(numbers: &[i64], op: impl Fn(i64, i64) -> i64) -> i64 {
    match numbers.split_first() {
        Some((&first, rest)) => rest.iter().fold(first, |acc, &n| op(acc, n)),
        None => 0,
    }
}

/// Arithmetic operations exposed over HTTP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Sum,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Xor,
}

impl Operation {
    /// Route table: request path to operation
    pub const ALL: [(&'static str, Self); 7] = [
        ("/sum", Self::Sum),
        ("/sub", Self::Sub),
        ("/mul", Self::Mul),
        ("/div", Self::Div),
        ("/and", Self::And),
        ("/or", Self::Or),
        ("/xor", Self::Xor),
    ];

    /// Look up the operation served at `path`
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|(route, _)| *route == path)
            .map(|&(_, op)| op)
    }

    pub fn path(self) -> &'static str {
        Self::ALL
            .iter()
            .find(|&&(_, op)| op == self)
            .map_or("/", |&(route, _)| route)
    }

    /// Short name used in access logs, e.g. `sum`
    pub fn name(self) -> &'static str {
        self.path().trim_start_matches('/')
    }

    /// Run the reducer for this operation
    pub fn apply(self, numbers: &[i64]) -> OpResult {
        match self {
            Self::Sum => OpResult::Int(sum(numbers)),
            Self::Sub => OpResult::Int(sub(numbers)),
            Self::Mul => OpResult::Int(mul(numbers)),
            Self::Div => OpResult::Float(div(numbers)),
            Self::And => OpResult::Int(and(numbers)),
            Self::Or => OpResult::Int(or(numbers)),
            Self::Xor => OpResult::Int(xor(numbers)),
        }
    }
}

/// Value produced by a reducer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OpResult {
    Int(i64),
    Float(f64),
}

impl Serialize for OpResult {
    /// JSON has no literal for non-finite floats, so they are written as
    /// the strings `"+Inf"`, `"-Inf"` and `"NaN"`.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Int(v) => serializer.serialize_i64(v),
            Self::Float(v) if v.is_nan() => serializer.serialize_str("NaN"),
            Self::Float(v) if v.is_infinite() => {
                serializer.serialize_str(if v > 0.0 { "+Inf" } else { "-Inf" })
            }
            Self::Float(v) => serializer.serialize_f64(v),
        }
    }
}

/// Response body: `{"result": <value>}`
#[derive(Debug, Serialize)]
pub struct ResultBody {
    pub result: OpResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum() {
        assert_eq!(sum(&[]), 0);
        assert_eq!(sum(&[1, 2, 3]), 6);
        assert_eq!(sum(&[-4, 4]), 0);
    }

    #[test]
    fn test_sum_head_plus_tail() {
        let cases: [&[i64]; 4] = [&[1], &[3, -7, 12], &[100, 200, 300, 400], &[i64::MAX, 1]];
        for xs in cases {
            assert_eq!(sum(xs), xs[0].wrapping_add(sum(&xs[1..])), "{xs:?}");
        }
    }

    #[test]
    fn test_sub() {
        assert_eq!(sub(&[5, 2, 1]), 2);
        assert_eq!(sub(&[]), 0);
        assert_eq!(sub(&[7]), 7);
        assert_eq!(sub(&[-1, -1]), 0);
    }

    #[test]
    fn test_mul() {
        assert_eq!(mul(&[2, 3, 4]), 24);
        assert_eq!(mul(&[]), 1);
        assert_eq!(mul(&[5, 0, 9]), 0);
    }

    #[test]
    fn test_div() {
        assert!((div(&[100, 2, 5]) - 10.0).abs() < f64::EPSILON);
        assert!(div(&[]).abs() < f64::EPSILON);
        assert!((div(&[1, 4]) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_div_by_zero() {
        assert_eq!(div(&[10, 0]), f64::INFINITY);
        assert_eq!(div(&[-10, 0]), f64::NEG_INFINITY);
        assert!(div(&[0, 0]).is_nan());
    }

    #[test]
    fn test_bitwise() {
        assert_eq!(and(&[6, 3]), 2);
        assert_eq!(or(&[6, 3]), 7);
        assert_eq!(xor(&[6, 3]), 5);
        assert_eq!(and(&[]), 0);
        assert_eq!(or(&[]), 0);
        assert_eq!(xor(&[]), 0);
        assert_eq!(xor(&[9]), 9);
    }

    #[test]
    fn test_overflow_wraps() {
        assert_eq!(sum(&[i64::MAX, 1]), i64::MIN);
        assert_eq!(sub(&[i64::MIN, 1]), i64::MAX);
        assert_eq!(mul(&[i64::MAX, 2]), -2);
    }

    #[test]
    fn test_route_table() {
        assert_eq!(Operation::from_path("/sum"), Some(Operation::Sum));
        assert_eq!(Operation::from_path("/xor"), Some(Operation::Xor));
        assert_eq!(Operation::from_path("/health-check"), None);
        assert_eq!(Operation::from_path("/sum/"), None);
        for (path, op) in Operation::ALL {
            assert_eq!(op.path(), path);
        }
    }

    #[test]
    fn test_result_serialization() {
        let json = |result| serde_json::to_string(&ResultBody { result }).unwrap();
        assert_eq!(json(OpResult::Int(6)), r#"{"result":6}"#);
        assert_eq!(json(OpResult::Float(10.0)), r#"{"result":10.0}"#);
        assert_eq!(json(OpResult::Float(f64::INFINITY)), r#"{"result":"+Inf"}"#);
        assert_eq!(json(OpResult::Float(f64::NEG_INFINITY)), r#"{"result":"-Inf"}"#);
        assert_eq!(json(OpResult::Float(f64::NAN)), r#"{"result":"NaN"}"#);
    }
}
