//! Geographic join key
//!
//! Sales rows carry a two-part FIPS code (state + municipal, separate numeric fields) while rental
//! rows carry one pre-combined code. Both are mapped onto a single string `FIPS_Code` column so
//! the long tables can be joined. The mapping is a formatting convention, not a verified
//! crosswalk: if either side changes width the join silently returns nothing.

use crate::error::Result;
use crate::schema::{FIPS_CODE, MUNICIPAL_CODE_FIPS, STATE_CODE_FIPS};
use polars::prelude::*;

/// How each source's geographic codes become the shared join key.
pub trait JoinKeyConvention {
    /// Key for a sales row from its state and municipal FIPS components.
    fn sales_key(&self, state_fips: i64, municipal_fips: i64) -> String;

    /// Key for a rental row from its pre-combined FIPS code.
    fn rental_key(&self, raw: &str) -> String;
}

/// `state + municipal (zero-padded to 3) + "99999"`, matching the HUD county code layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountyPaddingConvention;

impl CountyPaddingConvention {
    pub const MUNICIPAL_WIDTH: usize = 3;
    pub const SUFFIX: &'static str = "99999";
}

impl JoinKeyConvention for CountyPaddingConvention {
    fn sales_key(&self, state_fips: i64, municipal_fips: i64) -> String {
        format!(
            "{}{:0width$}{}",
            state_fips,
            municipal_fips,
            Self::SUFFIX,
            width = Self::MUNICIPAL_WIDTH
        )
    }

    fn rental_key(&self, raw: &str) -> String {
        raw.to_string()
    }
}

/// Add (or overwrite) the `FIPS_Code` column on a sales table.
pub fn apply_sales_keys(df: &mut DataFrame, convention: &dyn JoinKeyConvention) -> Result<()> {
    let state = df.column(STATE_CODE_FIPS)?.cast(&DataType::Int64)?;
    let municipal = df.column(MUNICIPAL_CODE_FIPS)?.cast(&DataType::Int64)?;

    let keys: Vec<Option<String>> = state
        .i64()?
        .into_iter()
        .zip(municipal.i64()?.into_iter())
        .map(|(s, m)| match (s, m) {
            (Some(s), Some(m)) => Some(convention.sales_key(s, m)),
            _ => None,
        })
        .collect();

    df.with_column(Series::new(FIPS_CODE, keys))?;
    Ok(())
}

/// Coerce the rental `FIPS_Code` column to strings.
///
/// Integer codes print as integers; float-typed codes (a column with gaps read as floats) are
/// truncated to integers first so `100199999.0` still keys as `100199999`.
pub fn apply_rental_keys(df: &mut DataFrame, convention: &dyn JoinKeyConvention) -> Result<()> {
    let raw = df.column(FIPS_CODE)?;
    let as_text = match raw.dtype() {
        DataType::String => raw.clone(),
        DataType::Float32 | DataType::Float64 => {
            raw.cast(&DataType::Int64)?.cast(&DataType::String)?
        }
        _ => raw.cast(&DataType::String)?,
    };

    let keys: Vec<Option<String>> = as_text
        .str()?
        .into_iter()
        .map(|v| v.map(|code| convention.rental_key(code)))
        .collect();

    df.with_column(Series::new(FIPS_CODE, keys))?;
    Ok(())
}
