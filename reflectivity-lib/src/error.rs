use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ReflectivityError {
    LengthMismatch {
        wave_vector: usize,
        reflectivity: usize,
    },
    ExtensionOutOfRange {
        num_low: usize,
        num_points: usize,
        len: usize,
    },
    UnknownMaterial(String),
    InvalidData { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, ReflectivityError>;

impl fmt::Display for ReflectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch {
                wave_vector,
                reflectivity,
            } => write!(
                f,
                "wave vector ({wave_vector}) and reflectivity ({reflectivity}) lengths must match"
            ),
            Self::ExtensionOutOfRange {
                num_low,
                num_points,
                len,
            } => write!(
                f,
                "{num_low} low extension points plus {num_points} requested points exceed array length {len}"
            ),
            Self::UnknownMaterial(name) => write!(f, "unknown material: {name}"),
            Self::InvalidData { line, message } => {
                write!(f, "invalid data on line {line}: {message}")
            }
        }
    }
}

impl std::error::Error for ReflectivityError {}
