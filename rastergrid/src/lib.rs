//! ESRI GridFloat (`.flt`) and BIL (`.bil`) raster grids.
//!
//! A grid is a rectangular array of samples covering a rectangle in
//! some planar coordinate space. Rows are stored north to south, one
//! sample per cell. GridFloat samples are 4-byte IEEE-754 floats
//! (least significant byte first unless the header says otherwise),
//! BIL samples are single unsigned bytes.
//!
//! # References
//!
//! 1. [USGS NED GridFloat](https://www.usgs.gov/faqs/what-are-digital-elevation-models-dems)
//! 1. [NLCD land cover classes](https://www.mrlc.gov/data/legends/national-land-cover-database-class-legend-and-description)

mod error;
mod header;

pub use crate::{
    error::RasterError,
    header::{Endian, Header},
};
use byteorder::{BigEndian as BE, ByteOrder, LittleEndian as LE};
use geo::geometry::Coord;
use log::debug;
use memmap2::Mmap;
use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
    path::Path,
    sync::Mutex,
};

/// Base floating point type used for all coordinates and values.
pub type C = f64;

/// A grid of 4-byte float samples (elevation, vegetation codes).
pub type FloatGrid = Grid<f32>;

/// A grid of single-byte samples (land cover codes).
pub type ByteGrid = Grid<u8>;

/// A fixed-width value stored once per grid cell.
pub trait Sample: Copy + Into<C> + Send + Sync + 'static {
    /// Width of one sample in the data file, in bytes.
    const SIZE: usize;

    /// Decodes a sample from exactly `Self::SIZE` bytes.
    fn decode(bytes: &[u8], endian: Endian) -> Self;

    /// Returns this sample as a value, or `None` if it marks a cell
    /// without data.
    fn value(self, nodata: Option<C>) -> Option<C> {
        let value: C = self.into();
        if !value.is_finite() || Some(value) == nodata {
            None
        } else {
            Some(value)
        }
    }
}

impl Sample for f32 {
    const SIZE: usize = 4;

    fn decode(bytes: &[u8], endian: Endian) -> Self {
        match endian {
            Endian::Little => LE::read_f32(bytes),
            Endian::Big => BE::read_f32(bytes),
        }
    }
}

impl Sample for u8 {
    const SIZE: usize = 1;

    fn decode(bytes: &[u8], _endian: Endian) -> Self {
        bytes[0]
    }
}

/// How to access a grid's data file.
///
/// All modes open the data file when the grid is constructed and
/// release it when the grid is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridMode {
    /// Decode every sample into memory up front.
    ///
    /// Lookups never block, at the cost of holding the whole grid in
    /// RAM.
    InMem,

    /// Memory map file contents.
    MemMap,

    /// Seek and read the file on every lookup.
    ///
    /// Lookups are serialized through a lock on the file handle.
    Stream,
}

enum SampleStore<S> {
    InMem(Box<[S]>),
    MemMap(Mmap),
    Stream(Mutex<File>),
}

impl<S: Sample> SampleStore<S> {
    fn get(&self, index: usize, endian: Endian) -> Result<S, RasterError> {
        match self {
            Self::InMem(samples) => Ok(samples[index]),
            Self::MemMap(raw) => {
                let start = index * S::SIZE;
                Ok(S::decode(&raw[start..start + S::SIZE], endian))
            }
            Self::Stream(file) => {
                let mut file = file.lock().map_err(|_| RasterError::Poisoned)?;
                file.seek(SeekFrom::Start((index * S::SIZE) as u64))?;
                let mut buf = [0_u8; 8];
                let buf = &mut buf[..S::SIZE];
                file.read_exact(buf)?;
                Ok(S::decode(buf, endian))
            }
        }
    }

    fn mode(&self) -> GridMode {
        match self {
            Self::InMem(_) => GridMode::InMem,
            Self::MemMap(_) => GridMode::MemMap,
            Self::Stream(_) => GridMode::Stream,
        }
    }
}

pub struct Grid<S> {
    header: Header,
    samples: SampleStore<S>,
}

impl<S: Sample> Grid<S> {
    /// Returns a grid backed by `samples`, listed north to south.
    pub fn from_samples(header: Header, samples: Vec<S>) -> Result<Self, RasterError> {
        let header = header.validate(S::SIZE)?;
        if samples.len() != header.len() {
            return Err(RasterError::SampleCount {
                expected: header.len(),
                actual: samples.len(),
            });
        }
        Ok(Self {
            header,
            samples: SampleStore::InMem(samples.into_boxed_slice()),
        })
    }

    /// Opens the data file at `path` using an already known `header`.
    ///
    /// This skips parsing header files, which adds up when opening
    /// many tiles.
    pub fn open<P: AsRef<Path>>(path: P, header: Header, mode: GridMode) -> Result<Self, RasterError> {
        let path = path.as_ref();
        let header = header.validate(S::SIZE)?;
        let file = File::open(path)?;

        let expected = (header.len() * S::SIZE) as u64;
        let actual = file.metadata()?.len();
        if actual != expected {
            return Err(RasterError::DataLen {
                expected,
                actual,
                path: path.to_owned(),
            });
        }

        debug!("opening {path:?}, mode: {mode:?}, header: {header:?}");
        let samples = match mode {
            GridMode::InMem => {
                let mut raw = Vec::with_capacity(header.len() * S::SIZE);
                BufReader::new(file).read_to_end(&mut raw)?;
                let samples: Vec<S> = raw
                    .chunks_exact(S::SIZE)
                    .map(|bytes| S::decode(bytes, header.endian))
                    .collect();
                SampleStore::InMem(samples.into_boxed_slice())
            }
            GridMode::MemMap => {
                let mmap = unsafe { Mmap::map(&file)? };
                SampleStore::MemMap(mmap)
            }
            GridMode::Stream => SampleStore::Stream(Mutex::new(file)),
        };

        Ok(Self { header, samples })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn mode(&self) -> GridMode {
        self.samples.mode()
    }

    /// Returns true if `coord` lies strictly inside this grid.
    pub fn contains(&self, coord: Coord<C>) -> bool {
        self.header.contains(coord)
    }

    /// Returns the raw sample of the cell containing `coord`, clamping
    /// to the nearest edge cell.
    pub fn sample(&self, coord: Coord<C>) -> Result<S, RasterError> {
        self.samples
            .get(self.header.index(coord), self.header.endian)
    }

    /// Returns the value of the cell containing `coord`, or `None`
    /// when that cell holds no data.
    pub fn get(&self, coord: Coord<C>) -> Result<Option<C>, RasterError> {
        Ok(self.sample(coord)?.value(self.header.nodata))
    }
}

impl FloatGrid {
    /// Loads the GridFloat grid described by the header at `path`.
    ///
    /// Samples are read from the sibling `.flt` file.
    pub fn load<P: AsRef<Path>>(path: P, mode: GridMode) -> Result<Self, RasterError> {
        let header = Header::read_gridfloat(&path)?;
        Self::open(path.as_ref().with_extension("flt"), header, mode)
    }
}

impl ByteGrid {
    /// Loads the BIL grid described by the header at `path`.
    ///
    /// Placement is read from the sibling `.blw` world file and
    /// samples from the sibling `.bil` file.
    pub fn load<P: AsRef<Path>>(path: P, mode: GridMode) -> Result<Self, RasterError> {
        let header = Header::read_bil(&path)?;
        Self::open(path.as_ref().with_extension("bil"), header, mode)
    }
}
