use chrono::NaiveDate;
use mapscout_core::{output_filename, MULTI_CITY_STEM};
use pretty_assertions::assert_eq;

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 27).unwrap()
}

#[test]
fn single_city_uses_transliterated_name_and_date() {
    assert_eq!(output_filename(&["Москва"], run_date()), "moskva_27.12.2025.csv");
    assert_eq!(output_filename(&["  Казань "], run_date()), "kazan_27.12.2025.csv");
}

#[test]
fn multiple_cities_use_generic_name() {
    let cities = ["Москва", "Казань", "Тверь"];
    let name = output_filename(&cities, run_date());
    assert_eq!(name, format!("{MULTI_CITY_STEM}_27.12.2025.csv"));
    for city in ["moskva", "kazan", "tver"] {
        assert!(!name.contains(city), "{name} leaks {city}");
    }
}

#[test]
fn filename_is_deterministic() {
    let first = output_filename(&["Нижний Новгород"], run_date());
    let second = output_filename(&["Нижний Новгород"], run_date());
    assert_eq!(first, second);
    assert_eq!(first, "nizhniy novgorod_27.12.2025.csv");
}

#[test]
fn unsafe_characters_in_city_are_replaced() {
    assert_eq!(
        output_filename(&["Ростов/на:Дону"], run_date()),
        "rostov_na_donu_27.12.2025.csv"
    );
}
