//! Runtime binding to a shared library implementing the Longley-Rice
//! point-to-point prediction.

use crate::{ItmError, P2pOutput, P2pParams, PointToPoint};
use libloading::Library;
use log::debug;
use std::{
    ffi::{c_char, c_int, CStr, OsStr},
    sync::{Mutex, PoisonError},
};

/// `point_to_point` as exported with C linkage.
///
/// `elev` is the `pfl` profile, `dbloss`, `strmode` (at least
/// [`MODE_LEN`] bytes) and `errnum` are outputs.
type FnPointToPoint = unsafe extern "C" fn(
    elev: *mut f64,
    tht_m: f64,
    rht_m: f64,
    eps_dielect: f64,
    sgm_conductivity: f64,
    eno_ns_surfref: f64,
    frq_mhz: f64,
    radio_climate: c_int,
    pol: c_int,
    conf: f64,
    rel: f64,
    dbloss: *mut f64,
    strmode: *mut c_char,
    errnum: *mut c_int,
);

const MODE_LEN: usize = 128;

pub struct ItmLibrary {
    point_to_point: FnPointToPoint,

    /// The model keeps static state between internal calls, so
    /// predictions run one at a time.
    lock: Mutex<()>,

    _library: Library,
}

impl ItmLibrary {
    /// Loads the shared library at `path`, which must export an
    /// unmangled `point_to_point`.
    pub fn open<P: AsRef<OsStr>>(path: P) -> Result<Self, ItmError> {
        let path = path.as_ref();
        let library = unsafe { Library::new(path) }?;
        let point_to_point = unsafe { *library.get::<FnPointToPoint>(b"point_to_point\0")? };
        debug!("loaded point_to_point from {path:?}");
        Ok(Self {
            point_to_point,
            lock: Mutex::new(()),
            _library: library,
        })
    }
}

impl PointToPoint for ItmLibrary {
    fn point_to_point(&self, pfl: &[f64], params: &P2pParams) -> P2pOutput {
        // The C signature takes a mutable profile.
        let mut elev = pfl.to_vec();
        let mut loss_db = 0.0;
        let mut mode = [0 as c_char; MODE_LEN];
        let mut err_code: c_int = -1;

        {
            let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
            unsafe {
                (self.point_to_point)(
                    elev.as_mut_ptr(),
                    params.tx_height_m,
                    params.rx_height_m,
                    params.epsilon,
                    params.sigma,
                    params.n0,
                    params.freq_mhz,
                    params.climate as c_int,
                    params.polarization as c_int,
                    params.confidence,
                    params.reliability,
                    &mut loss_db,
                    mode.as_mut_ptr(),
                    &mut err_code,
                );
            }
        }

        // Force termination in case the model filled the buffer.
        mode[MODE_LEN - 1] = 0;
        let mode = unsafe { CStr::from_ptr(mode.as_ptr()) }
            .to_string_lossy()
            .into_owned();

        P2pOutput {
            loss_db,
            mode,
            err_code,
        }
    }
}
