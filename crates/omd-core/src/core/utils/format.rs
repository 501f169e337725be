//! Renders floating-point values the way C's `printf` does, so the files this
//! crate writes line up byte-for-byte with those produced by the upstream
//! OpenMD tooling.

/// Renders `value` like C's `%.{significant}g`: fixed notation when the decimal
/// exponent fits, scientific otherwise, with trailing zeros removed.
pub fn general(value: f64, significant: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let significant = significant.max(1);

    let mut exponent = value.abs().log10().floor() as i32;
    let scaled = value.abs() / 10f64.powi(exponent);
    if format!("{:.*}", significant - 1, scaled).starts_with("10") {
        // Rounding to `significant` digits carried into the next decade.
        exponent += 1;
    }

    if exponent < -4 || exponent >= significant as i32 {
        let rendered = format!("{:.*e}", significant - 1, value);
        let (mantissa, exp) = rendered
            .split_once('e')
            .expect("exponential formatting always yields an exponent");
        let exp: i32 = exp.parse().expect("exponent is a valid integer");
        format!("{}e{:+03}", trim_fraction(mantissa), exp)
    } else {
        let decimals = (significant as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Renders `value` like C's `%e`: six fractional digits and a signed,
/// two-digit-minimum exponent.
pub fn scientific(value: f64) -> String {
    let rendered = format!("{:.6e}", value);
    let (mantissa, exp) = rendered
        .split_once('e')
        .expect("exponential formatting always yields an exponent");
    let exp: i32 = exp.parse().expect("exponent is a valid integer");
    format!("{mantissa}e{exp:+03}")
}

fn trim_fraction(rendered: &str) -> &str {
    if rendered.contains('.') {
        rendered.trim_end_matches('0').trim_end_matches('.')
    } else {
        rendered
    }
}
