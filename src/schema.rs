//! Column names shared by the raw, long and merged tables.

// Sales (Zillow-style) descriptive columns
pub const REGION_ID: &str = "RegionID";
pub const SIZE_RANK: &str = "SizeRank";
pub const REGION_NAME: &str = "RegionName";
pub const REGION_TYPE: &str = "RegionType";
pub const STATE_NAME: &str = "StateName";
pub const STATE: &str = "State";
pub const METRO: &str = "Metro";
pub const STATE_CODE_FIPS: &str = "StateCodeFIPS";
pub const MUNICIPAL_CODE_FIPS: &str = "MunicipalCodeFIPS";

// Rental (HUD-style) descriptive columns
pub const STATE_POSTAL_CODE: &str = "State Postal Code";
pub const STATE_FIPS_2_DIGIT: &str = "2 Digit State FIPS Code";
pub const HUD_AREA_CODE: &str = "HUD Specific Area Code";
pub const COUNTY_NAME: &str = "County Name";
pub const MSA: &str = "MSA";
pub const HUD_AREA_NAME: &str = "HUD_Area_Name";
pub const POPULATION: &str = "Population in 2020";

// Shared join key
pub const FIPS_CODE: &str = "FIPS_Code";

// Columns produced by reshaping
pub const DATE: &str = "Date";
pub const VALUE: &str = "Value";
pub const BEDROOM_TYPE: &str = "Bedroom_Type";
pub const BEDROOM_COUNT: &str = "Bedroom_Count";
pub const RENT: &str = "Rent";

// Computed per query
pub const RENTAL_ROI: &str = "Rental_ROI";

/// Prefix marking one rental column per bedroom-size category.
pub const BEDROOM_PREFIX: &str = "Bedroom_";

pub const SALES_ID_COLUMNS: [&str; 9] = [
    REGION_ID,
    SIZE_RANK,
    REGION_NAME,
    REGION_TYPE,
    STATE_NAME,
    STATE,
    METRO,
    STATE_CODE_FIPS,
    MUNICIPAL_CODE_FIPS,
];

pub const RENTAL_ID_COLUMNS: [&str; 8] = [
    STATE_POSTAL_CODE,
    STATE_FIPS_2_DIGIT,
    HUD_AREA_CODE,
    COUNTY_NAME,
    MSA,
    HUD_AREA_NAME,
    FIPS_CODE,
    POPULATION,
];

// Ranked result table
pub const AVERAGE_RENT: &str = "Average Rent";
pub const AVERAGE_PROPERTY_VALUE: &str = "Average Property Value";
pub const EXPECTED_ANNUAL_ROI: &str = "Expected Annual ROI";
pub const FORECLOSURES_URLS: &str = "Foreclosures_urls";
pub const RENTAL_URLS: &str = "Rental_urls";

pub const RANKED_COLUMNS: [&str; 8] = [
    METRO,
    COUNTY_NAME,
    POPULATION,
    AVERAGE_RENT,
    AVERAGE_PROPERTY_VALUE,
    EXPECTED_ANNUAL_ROI,
    FORECLOSURES_URLS,
    RENTAL_URLS,
];
