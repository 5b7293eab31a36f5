//! Deterministic demo dataset, written in the split layout.
//!
//! Gives the TUI something to render without production exports and gives
//! integration tests a realistic on-disk fixture, quirks included: the files
//! are semicolon-delimited with decimal commas, and the fund file starts
//! with a UTF-8 BOM so the single-byte read path sees the `ï»¿` header
//! artifact.

use std::fmt::Write as _;
use std::io;
use std::path::Path;

use chrono::{Months, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::layout::{COVENANT_FILE, FUND_FILE, MACRO_FILE};

pub const SAMPLE_FUNDS: [&str; 3] = ["FIDC Alpha", "FIDC Beta", "FIDC Gama"];
const MONTHS: u32 = 24;

/// Write `fund_data.csv`, `covenants.csv`, and `macro_data.csv` into `dir`.
pub fn write_sample_dataset(dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir)?;
    std::fs::write(dir.join(FUND_FILE), fund_file_bytes())?;
    std::fs::write(dir.join(COVENANT_FILE), covenant_file_bytes())?;
    std::fs::write(dir.join(MACRO_FILE), macro_file_bytes())?;
    Ok(())
}

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 31).expect("valid sample start date")
}

fn month(i: u32) -> NaiveDate {
    // Month-end reference dates; Months arithmetic clamps the day.
    start_date() + Months::new(i)
}

/// Deterministic per-fund RNG, seeded from the fund name.
fn fund_rng(fund: &str) -> StdRng {
    let seed: [u8; 32] = *blake3::hash(fund.as_bytes()).as_bytes();
    StdRng::from_seed(seed)
}

/// Format with the legacy decimal comma.
fn num(v: f64, decimals: usize) -> String {
    format!("{v:.decimals$}").replace('.', ",")
}

fn fund_file_bytes() -> Vec<u8> {
    let mut text = String::new();
    text.push_str(
        "fund;reference_date;net_worth;pv_credit_rights;pdd;sub_return_rate;\
         origination_month;net_allocation;status_concentration;status_liquidity;\
         subordination_senior;threshold_senior;subordination_mezz;threshold_mezz;\
         delinq_ratio_30;delinq_ratio_31-60;delinq_ratio_61-90;delinq_ratio_90+;\
         CR_due_30;CR_due_60;CR_due_90;CR_due_180;CR_due_360;CR_due_total\n",
    );

    for fund in SAMPLE_FUNDS {
        let mut rng = fund_rng(fund);
        let mut net_worth = rng.gen_range(40.0e6..120.0e6);

        for i in 0..MONTHS {
            let date = month(i);
            net_worth *= 1.0 + rng.gen_range(-0.01..0.03);
            let pv = net_worth * rng.gen_range(0.85..0.98);
            let pdd = pv * rng.gen_range(0.01..0.06);
            let sub_return = rng.gen_range(-0.4..2.2);
            let origination = net_worth * rng.gen_range(0.05..0.20);
            let allocation = rng.gen_range(0.70..0.99);

            let sub_senior = rng.gen_range(0.26..0.42);
            let sub_mezz = rng.gen_range(0.10..0.20);
            let delinq: [f64; 4] = [
                rng.gen_range(0.002..0.02),
                rng.gen_range(0.001..0.015),
                rng.gen_range(0.001..0.01),
                rng.gen_range(0.0..0.008),
            ];
            let aging: [f64; 5] = [
                pv * rng.gen_range(0.15..0.30),
                pv * rng.gen_range(0.15..0.25),
                pv * rng.gen_range(0.10..0.20),
                pv * rng.gen_range(0.10..0.20),
                pv * rng.gen_range(0.05..0.15),
            ];
            let aging_total: f64 = aging.iter().sum();

            let concentration = if rng.gen_bool(0.9) { "OK" } else { "FLAG" };
            let liquidity = if rng.gen_bool(0.95) { "OK" } else { "FLAG" };

            let _ = write!(
                text,
                "{fund};{date};{};{};{};{};{};{};{concentration};{liquidity};\
                 {};{};{};{};{};{};{};{};{};{};{};{};{};{}\n",
                num(net_worth, 2),
                num(pv, 2),
                num(pdd, 2),
                num(sub_return, 4),
                num(origination, 2),
                num(allocation, 4),
                num(sub_senior, 4),
                num(0.25, 2),
                num(sub_mezz, 4),
                num(0.08, 2),
                num(delinq[0], 5),
                num(delinq[1], 5),
                num(delinq[2], 5),
                num(delinq[3], 5),
                num(aging[0], 2),
                num(aging[1], 2),
                num(aging[2], 2),
                num(aging[3], 2),
                num(aging[4], 2),
                num(aging_total, 2),
            );
        }
    }

    // UTF-8 BOM ahead of an otherwise ASCII body — read back through the
    // WINDOWS_1252 path this surfaces the `ï»¿` header artifact.
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(text.as_bytes());
    bytes
}

fn covenant_file_bytes() -> Vec<u8> {
    let mut text = String::from("deal;date;metric;value;threshold;status\n");

    for fund in SAMPLE_FUNDS {
        let mut rng = fund_rng(fund);
        for i in 0..MONTHS {
            let date = month(i);
            let sub = rng.gen_range(0.26..0.42);
            let delinq = rng.gen_range(0.005..0.06);
            let sub_status = if sub >= 0.25 { "OK" } else { "FLAG" };
            let delinq_status = if delinq <= 0.05 { "OK" } else { "FLAG" };
            let _ = write!(
                text,
                "{fund};{date};subordination_senior;{};{};{sub_status}\n",
                num(sub, 4),
                num(0.25, 2),
            );
            let _ = write!(
                text,
                "{fund};{date};delinquency_total;{};{};{delinq_status}\n",
                num(delinq, 4),
                num(0.05, 2),
            );
        }
    }

    text.into_bytes()
}

fn macro_file_bytes() -> Vec<u8> {
    let mut rng = fund_rng("macro");
    let mut text = String::from("date;cdi;ipca;selic\n");

    let mut cdi = 13.65;
    let mut selic = 13.75;
    for i in 0..MONTHS {
        let date = month(i);
        cdi += rng.gen_range(-0.35..0.15);
        selic += rng.gen_range(-0.35..0.15);
        let ipca = rng.gen_range(0.1..0.9);
        let _ = write!(
            text,
            "{date};{};{};{}\n",
            num(cdi, 2),
            num(ipca, 2),
            num(selic, 2),
        );
    }

    text.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fund_file_starts_with_utf8_bom() {
        let bytes = fund_file_bytes();
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(fund_file_bytes(), fund_file_bytes());
        assert_eq!(covenant_file_bytes(), covenant_file_bytes());
        assert_eq!(macro_file_bytes(), macro_file_bytes());
    }

    #[test]
    fn fund_file_has_a_row_per_fund_month() {
        let bytes = fund_file_bytes();
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        let rows = text.lines().count() - 1;
        assert_eq!(rows, SAMPLE_FUNDS.len() * MONTHS as usize);
    }

    #[test]
    fn numbers_use_decimal_commas() {
        assert_eq!(num(1.5, 1), "1,5");
        assert_eq!(num(0.25, 2), "0,25");
    }
}
