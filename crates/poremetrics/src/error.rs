// All public functions report failures through the single opaque [`Error`]
// type. Internally, each flavor of failure gets its own small struct holding
// the details needed for a useful message, and [`ErrorKind`] ties them
// together.
//
// `poremetrics_internal` reports problems as `&'static str`. The public
// functions validate their arguments before calling into that crate, so any
// of those messages that make it through indicate a bug. We wrap them with
// `Error::internal_legacy_adhoc` rather than panicking.

/// The broad categories of [`Error`]
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// a numeric argument is out of range, or the grid is too small for the
    /// requested sampling
    InvalidArgument,
    /// an axis index is out of range, or the grid has an unsupported number
    /// of dimensions
    InvalidDimension,
    /// a broken internal invariant
    Internal,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
}

/// The underlying internal error type
#[non_exhaustive]
#[derive(Clone, Debug)]
enum ErrorKind {
    /// An error that occurs when an axis index exceeds the grid's dimensions
    Axis(AxisError),
    /// An error that occurs when a chord configuration with a fixed axis is
    /// used to draw chords along every axis
    ChordAxis(ChordAxisError),
    /// An error that occurs when a grid has an unsupported number of
    /// dimensions
    Dimensionality(DimensionalityError),
    /// An error that occurs when a float is NaN or lies outside of the
    /// acceptable range of values
    FloatRange(FloatRangeError),
    /// An error that occurs when an integer lies outside of the acceptable
    /// range of values
    IntegerRange(IntegerRangeError),
    /// An error that occurs within `poremetrics_internal`
    InternalLegacyAdHoc(InternalLegacyAdHocError),
    /// An error that occurs when two families of probe lines claim the same
    /// voxel
    LabelCollision(LabelCollisionError),
    /// An error that occurs when an unknown mode name is specified
    ModeName(ModeNameError),
    /// An error that occurs when a grid is too small to be sampled at the
    /// requested spacing
    SampleGrid(SampleGridError),
    /// An error that occurs when two grids that should line up have
    /// different shapes
    ShapeMismatch(ShapeMismatchError),
}

// define constructor methods for Error
impl Error {
    /// produce an error indicating that `axis` isn't a valid axis of an
    /// `ndim`-dimensional grid
    pub(crate) fn axis(axis: usize, ndim: usize) -> Self {
        Error {
            kind: ErrorKind::Axis(AxisError { axis, ndim }),
        }
    }

    /// produce an error indicating that a configuration pinned to `axis` was
    /// asked to draw chords along all 3 axes
    pub(crate) fn chord_axis(axis: usize) -> Self {
        Error {
            kind: ErrorKind::ChordAxis(ChordAxisError { axis }),
        }
    }

    /// produce an error indicating that `who` received a grid with `actual`
    /// dimensions, while it only supports grids with one of the `expected`
    /// dimension counts
    pub(crate) fn dimensionality(
        who: &'static str,
        actual: usize,
        expected: &'static [usize],
    ) -> Self {
        Error {
            kind: ErrorKind::Dimensionality(DimensionalityError {
                who,
                actual,
                expected,
            }),
        }
    }

    /// produce an error indicating that a float is NaN or lies outside the
    /// acceptable range of values
    pub(crate) fn float_range(
        description: &'static str,
        actual: f64,
        min_val: f64,
        max_val: f64,
    ) -> Self {
        Error {
            kind: ErrorKind::FloatRange(FloatRangeError {
                description,
                actual,
                min_val,
                max_val,
            }),
        }
    }

    /// produce an error indicating that an integer lies outside the acceptable
    /// range of values
    pub(crate) fn integer_range(
        description: &'static str,
        actual: i64,
        min_val: i64,
        max_val: i64,
    ) -> Self {
        Error {
            kind: ErrorKind::IntegerRange(IntegerRangeError {
                description,
                actual,
                min_val,
                max_val,
            }),
        }
    }

    /// wraps an internal error string
    pub(crate) fn internal_legacy_adhoc(message: &'static str) -> Self {
        Error {
            kind: ErrorKind::InternalLegacyAdHoc(InternalLegacyAdHocError(message)),
        }
    }

    /// produce an error indicating that the voxel at `index` was claimed by
    /// the probe lines of two different chord families
    pub(crate) fn label_collision(index: [usize; 3], existing: u8, incoming: u8) -> Self {
        Error {
            kind: ErrorKind::LabelCollision(LabelCollisionError {
                index,
                existing,
                incoming,
            }),
        }
    }

    /// produce an error indicating that an unknown mode name was specified
    pub(crate) fn mode_name(actual: String, choices: Vec<String>) -> Self {
        Error {
            kind: ErrorKind::ModeName(ModeNameError { actual, choices }),
        }
    }

    /// produce an error indicating that a grid of the given `shape` can't be
    /// sampled with `spacing`
    pub(crate) fn sample_grid(shape: &[usize], spacing: usize, what: &'static str) -> Self {
        Error {
            kind: ErrorKind::SampleGrid(SampleGridError {
                shape: shape.to_vec(),
                spacing,
                what,
            }),
        }
    }

    /// produce an error indicating that `who` was given a grid of shape
    /// `actual` that should have matched `expected`
    pub(crate) fn shape_mismatch(who: &'static str, expected: &[usize], actual: &[usize]) -> Self {
        Error {
            kind: ErrorKind::ShapeMismatch(ShapeMismatchError {
                who,
                expected: expected.to_vec(),
                actual: actual.to_vec(),
            }),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.kind {
            ErrorKind::ChordAxis(_)
            | ErrorKind::FloatRange(_)
            | ErrorKind::IntegerRange(_)
            | ErrorKind::ModeName(_)
            | ErrorKind::SampleGrid(_) => ErrorCategory::InvalidArgument,
            ErrorKind::Axis(_) | ErrorKind::Dimensionality(_) | ErrorKind::ShapeMismatch(_) => {
                ErrorCategory::InvalidDimension
            }
            ErrorKind::InternalLegacyAdHoc(_) | ErrorKind::LabelCollision(_) => {
                ErrorCategory::Internal
            }
        }
    }
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for ErrorKind {}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            ErrorKind::Axis(ref err) => err.fmt(f),
            ErrorKind::ChordAxis(ref err) => err.fmt(f),
            ErrorKind::Dimensionality(ref err) => err.fmt(f),
            ErrorKind::FloatRange(ref err) => err.fmt(f),
            ErrorKind::IntegerRange(ref err) => err.fmt(f),
            ErrorKind::InternalLegacyAdHoc(ref err) => err.fmt(f),
            ErrorKind::LabelCollision(ref err) => err.fmt(f),
            ErrorKind::ModeName(ref err) => err.fmt(f),
            ErrorKind::SampleGrid(ref err) => err.fmt(f),
            ErrorKind::ShapeMismatch(ref err) => err.fmt(f),
        }
    }
}

/// An error that occurs when an axis index exceeds the grid's dimensions
#[derive(Clone, Debug)]
struct AxisError {
    axis: usize,
    ndim: usize,
}

impl std::error::Error for AxisError {}

impl core::fmt::Display for AxisError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let AxisError { axis, ndim } = self;
        write!(
            f,
            "axis {axis} is out of range for a grid with {ndim} dimensions"
        )
    }
}

/// An error that occurs when a chord configuration with a fixed axis is used
/// to draw chords along every axis
#[derive(Clone, Debug)]
struct ChordAxisError {
    axis: usize,
}

impl std::error::Error for ChordAxisError {}

impl core::fmt::Display for ChordAxisError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "the chord configuration is pinned to axis {}, so it can't draw \
             chords along all 3 axes",
            self.axis
        )
    }
}

/// An error that occurs when a grid has an unsupported number of dimensions
#[derive(Clone, Debug)]
struct DimensionalityError {
    who: &'static str,
    actual: usize,
    expected: &'static [usize],
}

impl std::error::Error for DimensionalityError {}

impl core::fmt::Display for DimensionalityError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "{} received a grid with {} dimensions. Supported dimension \
             counts: {:?}",
            self.who, self.actual, self.expected
        )
    }
}

/// An error that occurs when a float is NaN or lies outside of the acceptable
/// range of values
#[derive(Clone, Debug)]
struct FloatRangeError {
    description: &'static str,
    actual: f64,
    min_val: f64,
    max_val: f64,
}

impl std::error::Error for FloatRangeError {}

impl core::fmt::Display for FloatRangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "{} has a value of {}. The value should be no less than {} and \
             not exceed {}",
            self.description, self.actual, self.min_val, self.max_val
        )
    }
}

/// An error that occurs when an integer lies outside of the acceptable
/// range of values
#[derive(Clone, Debug)]
struct IntegerRangeError {
    description: &'static str,
    actual: i64,
    min_val: i64,
    max_val: i64,
}

impl std::error::Error for IntegerRangeError {}

impl core::fmt::Display for IntegerRangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "{} has a value of {}. The value should be no less than {} and \
             not exceed {}",
            self.description, self.actual, self.min_val, self.max_val
        )
    }
}

/// wraps the string errors from `poremetrics_internal`
#[derive(Clone)]
struct InternalLegacyAdHocError(&'static str);

impl std::error::Error for InternalLegacyAdHocError {}

impl core::fmt::Display for InternalLegacyAdHocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::fmt::Debug for InternalLegacyAdHocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.0, f)
    }
}

/// An error that occurs when two families of probe lines claim the same voxel
#[derive(Clone, Debug)]
struct LabelCollisionError {
    index: [usize; 3],
    existing: u8,
    incoming: u8,
}

impl std::error::Error for LabelCollisionError {}

impl core::fmt::Display for LabelCollisionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let LabelCollisionError {
            index,
            existing,
            incoming,
        } = self;
        write!(
            f,
            "voxel {index:?} already holds chord label {existing} and can't \
             also receive label {incoming}"
        )
    }
}

/// An error occurs when an unknown mode name is specified
#[derive(Clone, Debug)]
struct ModeNameError {
    actual: String,
    choices: Vec<String>,
}

impl std::error::Error for ModeNameError {}

impl core::fmt::Display for ModeNameError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "{} is not a mode name. Choices include: {:?}",
            self.actual, self.choices
        )
    }
}

/// An error that occurs when a grid is too small to be sampled at the
/// requested spacing
#[derive(Clone, Debug)]
struct SampleGridError {
    shape: Vec<usize>,
    spacing: usize,
    what: &'static str,
}

impl std::error::Error for SampleGridError {}

impl core::fmt::Display for SampleGridError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "a grid with shape {:?} can't be sampled with a spacing of {}: {}",
            self.shape, self.spacing, self.what
        )
    }
}

/// An error that occurs when two grids that should line up have different
/// shapes
#[derive(Clone, Debug)]
struct ShapeMismatchError {
    who: &'static str,
    expected: Vec<usize>,
    actual: Vec<usize>,
}

impl std::error::Error for ShapeMismatchError {}

impl core::fmt::Display for ShapeMismatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "{} expected a grid with shape {:?}, not {:?}",
            self.who, self.expected, self.actual
        )
    }
}
