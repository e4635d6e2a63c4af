use rental_screener::dataset::AnalysisDataset;
use rental_screener::links::selected_county_links;
use rental_screener::outcome::QueryOutcome;
use rental_screener::screener::{screen, ScreenCriteria};
use rental_screener::{selectors, summary, ScreenerError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const RENTAL_CSV: &str = "\
State Postal Code,2 Digit State FIPS Code,HUD Specific Area Code,County Name,MSA,HUD_Area_Name,FIPS_Code,Population in 2020,Bedroom_0,Bedroom_1,Bedroom_2
CA,6,METRO41940M41940,Santa Clara,1,San Jose HMFA,608599999,1936259,2200,2600,3100
AL,1,METRO13820M13820,Jefferson,1,Birmingham MSA,107399999,674721,1000,1200,1400
AL,1,METRO33860M33860,Autauga,1,Montgomery MSA,100199999,58805,700,800,950
TX,48,NCNTY48301N48301,Loving,0,Loving County,4830199999,64,650,700,900
";

const SALES_CSV: &str = "\
RegionID,SizeRank,RegionName,RegionType,StateName,State,Metro,StateCodeFIPS,MunicipalCodeFIPS,9/30/2023,10/31/2023,11/30/2023
3101,16,Santa Clara County,county,CA,CA,\"San Jose-Sunnyvale-Santa Clara, CA\",6,85,1395000,1400000,1410000
1091,90,Jefferson County,county,AL,AL,\"Birmingham-Hoover, AL\",1,73,117000,118000,120000.4
1090,1200,Autauga County,county,AL,AL,\"Montgomery, AL\",1,1,205000,210000,
2000,2500,Washoe County,county,NV,NV,\"Reno, NV\",32,31,560000,565000,570000
";

fn write_fixtures(dir: &Path) -> (PathBuf, PathBuf) {
    let rental = dir.join("rental.csv");
    let sales = dir.join("sales.csv");
    fs::write(&rental, RENTAL_CSV).unwrap();
    fs::write(&sales, SALES_CSV).unwrap();
    (rental, sales)
}

fn load() -> (TempDir, AnalysisDataset) {
    let dir = TempDir::new().unwrap();
    let (rental, sales) = write_fixtures(dir.path());
    let dataset = AnalysisDataset::load(&rental, &sales).unwrap();
    (dir, dataset)
}

#[test]
fn test_load_builds_all_three_tables() {
    let (_dir, dataset) = load();
    assert_eq!(dataset.rental_long().height(), 12);
    assert_eq!(dataset.sales_long().height(), 12);
    // Santa Clara and Jefferson: 3 bedrooms x 3 dates; Autauga: 3 bedrooms x 2 valued dates.
    assert_eq!(dataset.merged().height(), 24);
}

#[test]
fn test_screen_from_csv() {
    let (_dir, dataset) = load();
    let criteria = match ScreenCriteria::parse("11/30/2023", 50_000.0, 500_000.0, 0.09) {
        QueryOutcome::Found(criteria) => criteria,
        other => panic!("unexpected criteria outcome: {:?}", other),
    };

    let ranked = screen(&dataset, &criteria).unwrap();
    assert_eq!(ranked.len(), 1);

    let jefferson = &ranked.markets()[0];
    assert_eq!(jefferson.county_name, "Jefferson");
    assert_eq!(jefferson.average_property_value, 120_000.0);
    assert_eq!(
        jefferson.display_row()[..6],
        ["Birmingham-Hoover, AL", "Jefferson", "674,721", "$1,200", "$120,000", "12.0%"]
    );

    let html = ranked.to_html();
    assert!(html.contains("https://www.apartments.com/houses/jefferson-al/"));
    assert!(html.contains("q=Jefferson%20county,%20AL"));
}

#[test]
fn test_screen_on_missing_month_is_empty_not_error() {
    let (_dir, dataset) = load();
    let criteria = ScreenCriteria {
        as_of: chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        min_price: 0.0,
        min_population: 0.0,
        min_roi: 0.0,
    };
    let ranked = screen(&dataset, &criteria).unwrap();
    assert!(ranked.is_empty());
    assert_eq!(ranked.to_dataframe().unwrap().width(), 8);
}

#[test]
fn test_summaries_and_selectors_from_csv() {
    let (_dir, dataset) = load();

    assert_eq!(selectors::states(&dataset).unwrap(), vec!["CA", "AL", "NV"]);
    let codes = selectors::fips_codes_for_metro(&dataset, "AL", "Montgomery, AL").unwrap();
    assert_eq!(codes, vec!["100199999"]);
    assert_eq!(
        selectors::counties_for_fips(&dataset, &codes).unwrap(),
        vec!["Autauga"]
    );

    let rents = summary::rent_summary(&dataset, &codes)
        .unwrap()
        .into_found()
        .unwrap();
    assert_eq!(rents.len(), 3);
    assert_eq!(rents[1].bedroom_type, "Bedroom_1");
    assert_eq!(rents[1].average_rent, 800.0);

    let populations = summary::population_summary(&dataset, &[])
        .unwrap()
        .into_found()
        .unwrap();
    assert_eq!(populations[0].county_name, "Santa Clara");
    assert_eq!(populations.len(), 4);

    let history = summary::metro_history(&dataset, "Reno, NV")
        .unwrap()
        .into_found()
        .unwrap();
    assert_eq!(history[0].region_name, "Washoe County");
    assert_eq!(history[0].points.len(), 3);
}

#[test]
fn test_links_for_selected_county() {
    let links = selected_county_links("Santa Clara", "CA").into_found().unwrap();
    assert!(links.foreclosure_url.contains("Santa%20Clara%20county,%20CA"));
    assert!(links.rental_url.contains("santa-clara-ca"));
    assert_eq!(selected_county_links("", "CA"), QueryOutcome::Empty);
}

#[test]
fn test_missing_required_column_fails_load() {
    let dir = TempDir::new().unwrap();
    let (rental, _) = write_fixtures(dir.path());
    let sales = dir.path().join("broken_sales.csv");
    fs::write(&sales, "RegionID,RegionName\n1,Santa Clara County\n").unwrap();

    match AnalysisDataset::load(&rental, &sales) {
        Err(ScreenerError::MissingColumn { table, column }) => {
            assert_eq!(table, "sales");
            assert_eq!(column, "SizeRank");
        }
        other => panic!("expected missing column, got {:?}", other.map(|_| ())),
    }
}
