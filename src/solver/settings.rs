use crate::algebra::*;
use derive_builder::Builder;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

#[derive(Error, Debug, PartialEq, Eq)]
/// Error type returned by settings validation
pub enum SettingsError {
    /// An error attributable to one of the fields
    #[error("Bad value for field \"{0}\"")]
    BadFieldValue(&'static str),
}

/// Solver settings.  Construct with [`Settings::default()`] or through
/// [`SettingsBuilder`], which validates the values on `build()`.
///
/// Only the `verbose*` fields are purely cosmetic.  Everything else
/// changes the iterates or the termination point.

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings<T: FloatT> {
    ///maximum number of iterations
    #[builder(default = "25")]
    pub max_iter: u32,

    ///maximum run time (seconds)
    #[builder(default = "f64::INFINITY")]
    pub time_limit: f64,

    ///verbose printing
    #[builder(default = "true")]
    pub verbose: bool,

    ///print residuals of each iterative refinement pass
    #[builder(default = "false")]
    pub verbose_refinement: bool,

    ///print the timer breakdown after each verbose solve
    #[builder(default = "false")]
    pub verbose_timing: bool,

    ///absolute duality gap tolerance
    #[builder(default = "default_tol::<T>()")]
    pub tol_gap: T,

    ///duality gap tolerance relative to the cost
    #[builder(default = "default_tol_rel::<T>()")]
    pub tol_gap_rel: T,

    ///primal and dual residual tolerance (infinity norm), scaled by the data norms
    #[builder(default = "default_tol::<T>()")]
    pub tol_feas: T,

    ///maximum interior point step length, as a fraction of the distance to the boundary
    #[builder(default = "(0.99).as_T()")]
    pub max_step_fraction: T,

    ///minimum step size accepted before declaring insufficient progress
    #[builder(default = "(1e-8).as_T()")]
    pub min_terminate_step_length: T,

    ///static regularization added to the diagonal of the KKT matrix
    #[builder(default = "default_kkt_reg::<T>()")]
    pub kkt_reg: T,

    ///iterative refinement passes against the unregularized KKT matrix
    #[builder(default = "1")]
    pub refine_steps: u32,

    ///start from a least squares initial point rather than (0, s_init, z_init)
    #[builder(default = "true")]
    pub better_start: bool,

    ///initial value of the slacks when better_start is off
    #[builder(default = "T::one()")]
    pub s_init: T,

    ///initial value of the duals when better_start is off
    #[builder(default = "T::one()")]
    pub z_init: T,
}

impl<T> Default for Settings<T>
where
    T: FloatT,
{
    fn default() -> Settings<T> {
        SettingsBuilder::<T>::default().build().unwrap()
    }
}

impl<T> Settings<T>
where
    T: FloatT,
{
    /// Checks that the settings are valid.
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_max_iter(self.max_iter)?;
        validate_positive(self.tol_gap, "tol_gap")?;
        validate_positive(self.tol_gap_rel, "tol_gap_rel")?;
        validate_positive(self.tol_feas, "tol_feas")?;
        validate_step_fraction(self.max_step_fraction)?;
        validate_nonnegative(self.min_terminate_step_length, "min_terminate_step_length")?;
        validate_nonnegative(self.kkt_reg, "kkt_reg")?;
        validate_positive(self.s_init, "s_init")?;
        validate_positive(self.z_init, "z_init")?;
        Ok(())
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<SettingsError> for SettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        SettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation.  Only fields that
/// have been explicitly set are checked.
impl<T> SettingsBuilder<T>
where
    T: FloatT,
{
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(max_iter) = self.max_iter {
            validate_max_iter(max_iter)?;
        }
        if let Some(v) = self.tol_gap {
            validate_positive(v, "tol_gap")?;
        }
        if let Some(v) = self.tol_gap_rel {
            validate_positive(v, "tol_gap_rel")?;
        }
        if let Some(v) = self.tol_feas {
            validate_positive(v, "tol_feas")?;
        }
        if let Some(v) = self.max_step_fraction {
            validate_step_fraction(v)?;
        }
        if let Some(v) = self.min_terminate_step_length {
            validate_nonnegative(v, "min_terminate_step_length")?;
        }
        if let Some(v) = self.kkt_reg {
            validate_nonnegative(v, "kkt_reg")?;
        }
        if let Some(v) = self.s_init {
            validate_positive(v, "s_init")?;
        }
        if let Some(v) = self.z_init {
            validate_positive(v, "z_init")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------
// precision dependent defaults.  f64 gets the fixed values and
// coarser types are floored at what their epsilon can resolve.
// ---------------------------------------------------------

fn default_tol<T: FloatT>() -> T {
    T::max((1e-6).as_T(), T::epsilon().sqrt())
}

fn default_tol_rel<T: FloatT>() -> T {
    T::max((1e-8).as_T(), T::epsilon() * (100.).as_T())
}

fn default_kkt_reg<T: FloatT>() -> T {
    T::max((1e-7).as_T(), T::epsilon() * (1000.).as_T())
}

// ---------------------------------------------------------
// individual validation functions go here
// ---------------------------------------------------------

fn validate_max_iter(max_iter: u32) -> Result<(), SettingsError> {
    if max_iter == 0 {
        return Err(SettingsError::BadFieldValue("max_iter"));
    }
    Ok(())
}

// NB: written as negations so that NaN is rejected too
fn validate_positive<T: FloatT>(v: T, field: &'static str) -> Result<(), SettingsError> {
    if !(v > T::zero()) {
        return Err(SettingsError::BadFieldValue(field));
    }
    Ok(())
}

fn validate_nonnegative<T: FloatT>(v: T, field: &'static str) -> Result<(), SettingsError> {
    if !(v >= T::zero()) {
        return Err(SettingsError::BadFieldValue(field));
    }
    Ok(())
}

fn validate_step_fraction<T: FloatT>(v: T) -> Result<(), SettingsError> {
    if !(v > T::zero() && v <= T::one()) {
        return Err(SettingsError::BadFieldValue("max_step_fraction"));
    }
    Ok(())
}

#[test]
fn test_settings_validate() {
    // all standard settings
    let settings = SettingsBuilder::<f64>::default().build().unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.max_iter, 25);
    assert!(settings.verbose);
    assert_eq!(settings.tol_gap, 1e-6);
    assert_eq!(settings.tol_feas, 1e-6);
    assert_eq!(settings.tol_gap_rel, 1e-8);
    assert_eq!(settings.kkt_reg, 1e-7);

    // single precision defaults are loosened to what f32 resolves
    let settings = Settings::<f32>::default();
    assert_eq!(settings.tol_feas, f32::EPSILON.sqrt());
    assert!(settings.tol_gap > 1e-4);
    assert!(settings.kkt_reg > 1e-4);
    assert!(settings.tol_gap_rel > 1e-6);

    // fail on bad values passed through the builder
    assert!(SettingsBuilder::<f64>::default()
        .tol_gap(0.0)
        .build()
        .is_err());
    assert!(SettingsBuilder::<f64>::default()
        .max_step_fraction(1.5)
        .build()
        .is_err());
    assert!(SettingsBuilder::<f64>::default()
        .tol_gap_rel(-1e-8)
        .build()
        .is_err());
    assert!(SettingsBuilder::<f64>::default()
        .max_iter(0)
        .build()
        .is_err());
    assert!(SettingsBuilder::<f64>::default()
        .z_init(f64::NAN)
        .build()
        .is_err());

    // good values pass
    let settings = SettingsBuilder::<f64>::default()
        .verbose(false)
        .max_step_fraction(1.0)
        .kkt_reg(0.0)
        .build()
        .unwrap();
    assert!(!settings.verbose);

    // directly construct a bad Settings and manually check
    let settings = Settings::<f64> {
        kkt_reg: -1.0,
        ..Settings::default()
    };
    assert_eq!(
        settings.validate(),
        Err(SettingsError::BadFieldValue("kkt_reg"))
    );
}
