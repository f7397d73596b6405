//! printf-style number formatting for the text tables read by OpenFOAM.

/// Format like `%.<prec>e`, e.g. `1.234560e+02`.
pub fn scientific(val: f64, prec: usize) -> String {
    if !val.is_finite() {
        return non_finite(val);
    }
    let sci = format!("{val:.prec$e}");
    let (mantissa, exp) = split_exp(&sci);
    format!("{mantissa}e{}", exp_suffix(exp))
}

/// Format like `%.<sig>g`: `sig` significant digits, trailing zeros removed,
/// exponent form when the exponent is below -4 or at least `sig`.
pub fn general(val: f64, sig: usize) -> String {
    if !val.is_finite() {
        return non_finite(val);
    }
    let sig = sig.max(1);
    let prec = sig - 1;
    let sci = format!("{val:.prec$e}");
    let (mantissa, exp) = split_exp(&sci);

    if exp < -4 || exp >= sig as i32 {
        format!("{}e{}", trim_zeros(mantissa), exp_suffix(exp))
    } else {
        let prec = (prec as i32 - exp) as usize;
        trim_zeros(&format!("{val:.prec$}")).to_string()
    }
}

fn split_exp(sci: &str) -> (&str, i32) {
    match sci.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse().unwrap_or(0)),
        None => (sci, 0),
    }
}

fn exp_suffix(exp: i32) -> String {
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{sign}{:02}", exp.abs())
}

fn trim_zeros(num: &str) -> &str {
    if num.contains('.') {
        num.trim_end_matches('0').trim_end_matches('.')
    } else {
        num
    }
}

fn non_finite(val: f64) -> String {
    if val.is_nan() {
        "nan".to_string()
    } else if val > 0.0 {
        "inf".to_string()
    } else {
        "-inf".to_string()
    }
}
