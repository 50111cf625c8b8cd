// Innings-pitched notation: "6.1" means six innings plus one out, not 6.1.
//
// The fractional digit counts outs (thirds of an inning). Decoding turns the
// box-score string into a true inning count so values can be summed; encoding
// turns a summed season total back into box-score notation.

/// How far a remainder may drift from an exact third and still be treated
/// as one.
const THIRDS_TOLERANCE: f64 = 0.01;

const ONE_THIRD: f64 = 1.0 / 3.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;

/// Decode a box-score innings string into a true inning count.
///
/// `"6.1"` → 6.333…, `"6.2"` → 6.666…, `"6"` → 6.0. Anything malformed
/// (absent, empty, non-numeric, negative, or an outs digit other than
/// 0/1/2) decodes to `0.0`; a player who never pitched has no IP field.
pub fn decode(raw: Option<&str>) -> f64 {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return 0.0;
    };

    match raw.split_once('.') {
        Some((whole, outs)) => {
            let Ok(whole) = whole.parse::<u32>() else {
                return 0.0;
            };
            let outs = match outs {
                "0" => 0.0,
                "1" => 1.0,
                "2" => 2.0,
                _ => return 0.0,
            };
            f64::from(whole) + outs / 3.0
        }
        None => raw.parse::<u32>().map(f64::from).unwrap_or(0.0),
    }
}

/// Encode a summed inning count back into box-score notation.
///
/// Zero (or anything non-positive) encodes as `"0"`. A remainder close to a
/// third or two thirds becomes `.1` / `.2`; a remainder close to zero or one
/// snaps to the whole inning. Any other remainder falls back to the raw
/// value with two decimals.
pub fn encode(total: f64) -> String {
    if !total.is_finite() || total <= 0.0 {
        return "0".to_string();
    }

    let whole = total.floor();
    let frac = total - whole;
    // `whole` is a non-negative integral f64 well inside u64 range here.
    let whole_int = whole as u64;

    // Near-zero and near-one remainders are summation drift on whole
    // innings (thirds adding up to 9.9999…), so they snap to the integer
    // instead of taking the two-decimal fallback.
    if frac.abs() < THIRDS_TOLERANCE {
        whole_int.to_string()
    } else if (frac - 1.0).abs() < THIRDS_TOLERANCE {
        (whole_int + 1).to_string()
    } else if (frac - ONE_THIRD).abs() < THIRDS_TOLERANCE {
        format!("{whole_int}.1")
    } else if (frac - TWO_THIRDS).abs() < THIRDS_TOLERANCE {
        format!("{whole_int}.2")
    } else {
        format!("{total:.2}")
    }
}
