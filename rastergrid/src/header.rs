//! Text headers describing a grid's shape and placement.
//!
//! # References
//!
//! 1. [ESRI GridFloat](https://desktop.arcgis.com/en/arcmap/latest/manage-data/raster-and-images/esri-ascii-raster-format.htm)
//! 1. [BIL, BIP, and BSQ raster files](https://desktop.arcgis.com/en/arcmap/latest/manage-data/raster-and-images/bil-bip-and-bsq-raster-files.htm)
//! 1. [World files](https://en.wikipedia.org/wiki/World_file)

use crate::{error::RasterError, C};
use geo::geometry::Coord;
use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader, ErrorKind},
    path::Path,
    str::FromStr,
};

/// Byte order of multi-byte samples in a data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    /// `LSBFIRST`, the usual order for GridFloat `.flt` files.
    #[default]
    Little,

    /// `MSBFIRST`.
    Big,
}

/// Shape and placement of a grid in its own (converted) coordinate
/// space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Header {
    /// Number of columns.
    pub ncols: usize,

    /// Number of rows.
    pub nrows: usize,

    /// West edge of the grid.
    pub left: C,

    /// South edge of the grid.
    pub bottom: C,

    /// Width (and height) of a single cell.
    pub cellsize: C,

    /// Sample value used to mark cells without data.
    pub nodata: Option<C>,

    /// Byte order of samples wider than one byte.
    pub endian: Endian,
}

impl Header {
    /// Returns a header for a grid whose lower-left corner is
    /// (`left`, `bottom`).
    pub fn new(ncols: usize, nrows: usize, left: C, bottom: C, cellsize: C) -> Self {
        Self {
            ncols,
            nrows,
            left,
            bottom,
            cellsize,
            nodata: None,
            endian: Endian::Little,
        }
    }

    #[must_use]
    pub fn with_nodata(mut self, nodata: C) -> Self {
        self.nodata = Some(nodata);
        self
    }

    #[must_use]
    pub fn with_endian(mut self, endian: Endian) -> Self {
        self.endian = endian;
        self
    }

    /// North edge of the grid.
    #[allow(clippy::cast_precision_loss)]
    pub fn top(&self) -> C {
        self.bottom + self.nrows as C * self.cellsize
    }

    /// East edge of the grid.
    #[allow(clippy::cast_precision_loss)]
    pub fn right(&self) -> C {
        self.left + self.ncols as C * self.cellsize
    }

    /// Returns the number of cells in the grid, saturating at
    /// `usize::MAX` for dimensions [`checked_len`](Self::checked_len)
    /// rejects.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.checked_len().unwrap_or(usize::MAX)
    }

    /// Returns the number of cells in the grid, or `None` if it
    /// overflows `usize`.
    pub fn checked_len(&self) -> Option<usize> {
        self.ncols.checked_mul(self.nrows)
    }

    /// Returns true if `coord` lies strictly inside the grid's
    /// coverage rectangle.
    pub fn contains(&self, Coord { x, y }: Coord<C>) -> bool {
        x > self.left && x < self.right() && y > self.bottom && y < self.top()
    }

    /// Returns the linear offset of the cell containing `coord`.
    ///
    /// Coordinates outside the grid clamp to the nearest edge cell. A
    /// coordinate on a cell boundary belongs to the cell whose south
    /// (or west) edge it lies on.
    pub fn index(&self, Coord { x, y }: Coord<C>) -> usize {
        let row = clamp_cell((y - self.bottom) / self.cellsize, self.nrows);
        let col = clamp_cell((x - self.left) / self.cellsize, self.ncols);
        // Rows are stored north to south.
        (self.nrows - 1 - row) * self.ncols + col
    }

    /// Checks the header describes a grid of `sample_size` byte
    /// samples whose data fits in memory.
    pub(crate) fn validate(self, sample_size: usize) -> Result<Self, RasterError> {
        if self.ncols == 0 {
            return Err(invalid("ncols", self.ncols));
        }
        if self.nrows == 0 {
            return Err(invalid("nrows", self.nrows));
        }
        if !(self.cellsize.is_finite() && self.cellsize > 0.0) {
            return Err(invalid("cellsize", self.cellsize));
        }
        if !(self.left.is_finite() && self.bottom.is_finite()) {
            return Err(invalid("corner", format!("{},{}", self.left, self.bottom)));
        }
        if self
            .checked_len()
            .and_then(|cells| cells.checked_mul(sample_size))
            .is_none()
        {
            return Err(invalid("ncols", format!("{} x {}", self.ncols, self.nrows)));
        }
        Ok(self)
    }
}

/// GridFloat (`.hdr` + `.flt`) headers.
impl Header {
    /// Parses a GridFloat header.
    ///
    /// ```text
    /// ncols         3612
    /// nrows         3612
    /// xllcorner     -111.50166666667
    /// yllcorner     44.998333333333
    /// cellsize      0.00027777777777778
    /// NODATA_value  -9999
    /// byteorder     LSBFIRST
    /// ```
    pub fn parse_gridfloat<R: BufRead>(rdr: R) -> Result<Self, RasterError> {
        let fields = fields(rdr)?;
        let endian = match optional::<String>(&fields, "byteorder")?.as_deref() {
            None => Endian::Little,
            Some(order) if order.eq_ignore_ascii_case("lsbfirst") => Endian::Little,
            Some(order) if order.eq_ignore_ascii_case("msbfirst") => Endian::Big,
            Some(order) => return Err(invalid("byteorder", order)),
        };
        Self {
            ncols: required(&fields, "ncols")?,
            nrows: required(&fields, "nrows")?,
            left: required(&fields, "xllcorner")?,
            bottom: required(&fields, "yllcorner")?,
            cellsize: required(&fields, "cellsize")?,
            nodata: optional(&fields, "nodata_value")?,
            endian,
        }
        .validate(1)
    }

    /// Reads the GridFloat header at `path`.
    pub fn read_gridfloat<P: AsRef<Path>>(path: P) -> Result<Self, RasterError> {
        Self::parse_gridfloat(BufReader::new(File::open(path)?))
    }
}

/// BIL (`.hdr` + `.blw` + `.bil`) headers.
impl Header {
    /// Parses a single band, 8-bit BIL header.
    ///
    /// Row and column counts come from `hdr`. Cell size and the
    /// upper-left corner come from the `world` file when present,
    /// otherwise from the header's `XDIM`, `ULXMAP` and `ULYMAP`
    /// fields.
    pub fn parse_bil<R, W>(hdr: R, world: Option<W>) -> Result<Self, RasterError>
    where
        R: BufRead,
        W: BufRead,
    {
        let fields = fields(hdr)?;
        if let Some(bits) = optional::<u32>(&fields, "nbits")? {
            if bits != 8 {
                return Err(RasterError::Bits(bits));
            }
        }
        let ncols: usize = required(&fields, "ncols")?;
        let nrows: usize = required(&fields, "nrows")?;

        let (cellsize, left, top) = match world {
            Some(world) => parse_world(world)?,
            None => (
                required(&fields, "xdim")?,
                required(&fields, "ulxmap")?,
                required(&fields, "ulymap")?,
            ),
        };

        #[allow(clippy::cast_precision_loss)]
        let bottom = top - nrows as C * cellsize;
        Self::new(ncols, nrows, left, bottom, cellsize).validate(1)
    }

    /// Reads the BIL header at `path` along with its sibling `.blw`
    /// world file, if any.
    pub fn read_bil<P: AsRef<Path>>(path: P) -> Result<Self, RasterError> {
        let hdr = BufReader::new(File::open(&path)?);
        let world = match File::open(path.as_ref().with_extension("blw")) {
            Ok(file) => Some(BufReader::new(file)),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        Self::parse_bil(hdr, world)
    }
}

/// Returns `(cellsize, left, top)` from the six lines of a world
/// file.
fn parse_world<W: BufRead>(world: W) -> Result<(C, C, C), RasterError> {
    const NAMES: [&str; 6] = ["xdim", "yskew", "xskew", "ydim", "ulxmap", "ulymap"];
    let mut values = [0.0; 6];
    let mut lines = world.lines();
    for (value, name) in values.iter_mut().zip(NAMES) {
        let line = loop {
            match lines.next() {
                Some(line) => {
                    let line = line?;
                    if !line.trim().is_empty() {
                        break line;
                    }
                }
                None => return Err(RasterError::MissingField(name)),
            }
        };
        *value = line.trim().parse().map_err(|_| invalid(name, line.trim()))?;
    }
    Ok((values[0], values[4], values[5]))
}

/// Collects `key value` pairs, lower-casing keys.
fn fields<R: BufRead>(rdr: R) -> Result<HashMap<String, String>, RasterError> {
    let mut fields = HashMap::new();
    for line in rdr.lines() {
        let line = line?;
        let mut tokens = line.split_whitespace();
        if let (Some(key), Some(value)) = (tokens.next(), tokens.next()) {
            fields.insert(key.to_ascii_lowercase(), value.to_owned());
        }
    }
    Ok(fields)
}

fn required<T: FromStr>(
    fields: &HashMap<String, String>,
    field: &'static str,
) -> Result<T, RasterError> {
    optional(fields, field)?.ok_or(RasterError::MissingField(field))
}

fn optional<T: FromStr>(
    fields: &HashMap<String, String>,
    field: &'static str,
) -> Result<Option<T>, RasterError> {
    fields
        .get(field)
        .map(|value| value.parse().map_err(|_| invalid(field, value)))
        .transpose()
}

fn invalid<V: ToString>(field: &'static str, value: V) -> RasterError {
    RasterError::InvalidField {
        field,
        value: value.to_string(),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_cell(offset: C, n: usize) -> usize {
    let cell = offset.floor();
    if cell.is_nan() || cell < 0.0 {
        0
    } else {
        (cell as usize).min(n - 1)
    }
}
