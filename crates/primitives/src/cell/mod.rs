use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};


/// A single typed table value.
///
/// `Null` is the explicit "no value" marker. It is what unmatched rows hold
/// in annotation columns, and it never takes part in string comparisons.
#[derive(Debug, Clone, Default)]
pub enum Cell {
	/// Absent value.
	#[default]
	Null,
	/// Free text.
	Str(String),
	/// Signed integer.
	Int(i64),
	/// Floating point number.
	Float(f64),
	/// Boolean flag.
	Bool(bool),
}

impl Cell {
	/// Creates a text cell.
	pub fn str(value: impl Into<String>) -> Self {
		Self::Str(value.into())
	}

	pub const fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Returns the dtype of this single value.
	pub const fn cell_type(&self) -> CellType {
		match self {
			Self::Null => CellType::Null,
			Self::Str(_) => CellType::Str,
			Self::Int(_) => CellType::Int,
			Self::Float(_) => CellType::Float,
			Self::Bool(_) => CellType::Bool,
		}
	}

	/// Borrows the text of a `Str` cell.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(s) => Some(s),
			_ => None,
		}
	}

	/// Text form used for record comparisons.
	///
	/// Text cells are borrowed, scalar cells are rendered, and `Null` has no
	/// text at all.
	pub fn text(&self) -> Option<Cow<'_, str>> {
		match self {
			Self::Null => None,
			Self::Str(s) => Some(Cow::Borrowed(s)),
			Self::Int(v) => Some(Cow::Owned(v.to_string())),
			Self::Float(v) => Some(Cow::Owned(render_float(*v))),
			Self::Bool(true) => Some(Cow::Borrowed("True")),
			Self::Bool(false) => Some(Cow::Borrowed("False")),
		}
	}

	/// String form used when a cell becomes a linking key.
	///
	/// Scalars render the way the reference data was keyed when it was
	/// exported: floats keep their fractional part (`5.0` is `"5.0"`) and
	/// switch to exponent form outside `1e-4..1e16` (`"1e+20"`), booleans
	/// are `"True"`/`"False"`, and `Null` renders as the empty string.
	pub fn to_key_string(&self) -> String {
		self.text().map(Cow::into_owned).unwrap_or_default()
	}
}

/// Shortest round-trip digits, positional for decimal exponents in
/// `-4..16` and `d.ddde±XX` otherwise.
fn render_float(value: f64) -> String {
	if value.is_nan() {
		return "nan".to_owned();
	}
	if value.is_infinite() {
		return if value > 0.0 { "inf" } else { "-inf" }.to_owned();
	}

	let scientific = format!("{value:e}");
	let Some((mantissa, exponent)) = scientific.split_once('e') else {
		return format!("{value:?}");
	};
	let Ok(exponent) = exponent.parse::<i32>() else {
		return format!("{value:?}");
	};

	if !(-4..16).contains(&exponent) {
		let sign = if exponent < 0 { '-' } else { '+' };
		return format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs());
	}

	let (negative, mantissa) = match mantissa.strip_prefix('-') {
		Some(rest) => (true, rest),
		None => (false, mantissa),
	};
	let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

	let mut out = String::with_capacity(digits.len() + 8);
	if negative {
		out.push('-');
	}
	if exponent < 0 {
		out.push_str("0.");
		out.extend(std::iter::repeat_n('0', exponent.unsigned_abs() as usize - 1));
		out.push_str(&digits);
	} else {
		let whole = exponent as usize + 1;
		if digits.len() <= whole {
			out.push_str(&digits);
			out.extend(std::iter::repeat_n('0', whole - digits.len()));
			out.push_str(".0");
		} else {
			out.push_str(&digits[..whole]);
			out.push('.');
			out.push_str(&digits[whole..]);
		}
	}
	out
}

// Floats compare by bit pattern so cells can key hash maps.
impl PartialEq for Cell {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Null, Self::Null) => true,
			(Self::Str(a), Self::Str(b)) => a == b,
			(Self::Int(a), Self::Int(b)) => a == b,
			(Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
			(Self::Bool(a), Self::Bool(b)) => a == b,
			_ => false,
		}
	}
}

impl Eq for Cell {}

impl Hash for Cell {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::mem::discriminant(self).hash(state);
		match self {
			Self::Null => {}
			Self::Str(s) => s.hash(state),
			Self::Int(v) => v.hash(state),
			Self::Float(v) => v.to_bits().hash(state),
			Self::Bool(v) => v.hash(state),
		}
	}
}

impl fmt::Display for Cell {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.text() {
			Some(text) => f.write_str(&text),
			None => f.write_str("null"),
		}
	}
}

impl From<&str> for Cell {
	fn from(value: &str) -> Self {
		Self::Str(value.to_owned())
	}
}

impl From<String> for Cell {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}

impl From<i64> for Cell {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<f64> for Cell {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<bool> for Cell {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

/// Column dtype, derived from the non-null cells of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellType {
	/// Empty or all-null column.
	Null,
	Str,
	Int,
	Float,
	Bool,
	/// More than one non-null type is present.
	Mixed,
}

impl CellType {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Str => "str",
			Self::Int => "int",
			Self::Float => "float",
			Self::Bool => "bool",
			Self::Mixed => "mixed",
		}
	}

	/// Folds the types of `cells` into a single column dtype.
	pub fn infer<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Self {
		cells.into_iter().filter(|cell| !cell.is_null()).fold(Self::Null, |acc, cell| match (acc, cell.cell_type()) {
			(Self::Null, ty) => ty,
			(acc, ty) if acc == ty => acc,
			_ => Self::Mixed,
		})
	}
}

impl fmt::Display for CellType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
