//! Fixed pricing inputs
//!
//! The pricing commands take no operator input; they run these reference
//! trades.

use dynrun_core::{
    FixedRateBondInput, FxForwardInput, FxLeg, HiFiveSwapInput, StockPricingInput,
};

pub fn stock_pricing() -> StockPricingInput {
    StockPricingInput {
        amount: 1200.0,
        price: 1000.0,
        base_price: 1000.0,
        beta: 1.2,
        fx: 0.0,
        p: vec![0.0; 5],
    }
}

/// EUR/KRW forward, GIRR delta requested
pub fn fx_forward() -> FxForwardInput {
    let year_frac = vec![0.25, 0.5, 1.0, 2.0, 3.0, 5.0, 10.0, 15.0, 20.0, 30.0];

    FxForwardInput {
        maturity_date: 46164,
        revaluation_date: 45657,
        exchange_rate: 1532.578,
        buy: FxLeg {
            currency: "EUR".to_string(),
            notional: 4576279.99,
            day_count_basis: 3,
            discount_curve: "IREUR-CRS".to_string(),
            curve_year_frac: year_frac.clone(),
            market_data: vec![
                2.64438703, 2.38058648, 2.10763173, 1.97593133, 1.98563969, 2.07148214,
                2.25037149, 2.36128877, 2.34768987, 2.2255283,
            ],
        },
        sell: FxLeg {
            currency: "KRW".to_string(),
            notional: 6820853799.5,
            day_count_basis: 3,
            discount_curve: "IRKRW-CRS".to_string(),
            curve_year_frac: year_frac,
            market_data: vec![3.08, 2.58, 2.33, 2.19, 2.19, 2.23, 2.24, 2.12, 2.04, 2.04],
        },
        cal_type: 2,
        log_yn: 1,
    }
}

/// Semi-annual fixed coupon bond, GIRR and CSR sensitivities requested
pub fn fixed_rate_bond() -> FixedRateBondInput {
    FixedRateBondInput {
        evaluation_date: 45657,
        settlement_days: 0,
        issue_date: 44175,
        maturity_date: 47827,
        notional: 6000000000.0,
        coupon_rate: 0.015,
        // Actual/Actual (Bond)
        coupon_day_counter: 5,
        payment_dates: vec![
            45818, 46001, 46183, 46366, 46548, 46731, 46916, 47098, 47280, 47462, 47644, 47827,
        ],
        real_start_dates: vec![
            45636, 45818, 46001, 46183, 46366, 46548, 46731, 46916, 47098, 47280, 47462, 47644,
        ],
        real_end_dates: vec![
            45818, 46001, 46183, 46366, 46548, 46731, 46916, 47098, 47280, 47462, 47644, 47827,
        ],
        girr_tenor_days: vec![91, 183, 365, 730, 1095, 1825, 3650, 5475, 7300, 10950],
        girr_rates: vec![
            0.0337, 0.0317, 0.0285, 0.0272, 0.0269, 0.0271, 0.0278, 0.0272, 0.0254, 0.0222,
        ],
        girr_day_counter: 1,
        girr_interpolator: 1,
        girr_compounding: 1,
        girr_frequency: 1,
        spread_over_yield: 0.001389,
        spread_over_yield_compounding: 1,
        spread_over_yield_day_counter: 1,
        csr_tenor_days: vec![183, 365, 1095, 1825, 3650],
        csr_rates: vec![0.0, 0.0, 0.0, 0.0005, 0.001],
        cal_type: 3,
        log_yn: 1,
    }
}

/// Three-asset HiFive swap with a floating leg
pub fn hifive_swap() -> HiFiveSwapInput {
    HiFiveSwapInput {
        price_date: 20170808,
        notional_amt: 10000.0,
        underlying_price: vec![130.0, 150.0, 130.0, 150.0, 130.0, 150.0],
        t_curve_info: vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0, 2.0, 3.0],
        curve_info: vec![
            0.035138, 0.035138, 0.035138, -0.0052, -0.0052, -0.0052, -0.0001, -0.0001, -0.0001,
            0.035138, 0.035138, 0.035138,
        ],
        nt: vec![3, 3, 3, 3],
        t_vol: vec![1.0, 2.0, 1.0, 2.0, 1.0, 2.0],
        parity: vec![0.9, 1.0, 1.1, 0.9, 1.0, 1.1, 0.9, 1.0, 1.1],
        local_vol_surface: vec![0.2; 18],
        n_vol: vec![2, 2, 2],
        n_parity: vec![3, 3, 3],
        underlying_corr: vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        t_div: vec![100, 100, 200, 100, 200, 300],
        div: vec![0.035138, 0.035138, 0.035138, 5.0, 5.0, 5.0],
        n_div: vec![1, 2, 3],
        div_type_flag: vec![0, 1, 2],
        fx_t_vol: vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0, 2.0, 3.0],
        fx_vol: vec![0.035138; 9],
        fx_n_vol: vec![3, 3, 3],
        fx_corr: vec![0.5, 0.5, 0.5],
        quanto_flag: vec![0, 1, 2],
        n_stock: 3,
        n_strike: 6,
        x: strike_grid(),
        ko_barrier: vec![0.9; 6],
        ki_barrier: vec![0.5; 3],
        pay_off_slope: (0..32).map(|i| if i % 8 == 7 { 1.0 } else { 0.0 }).collect(),
        pay_off_amount: vec![0.0; 32],
        dates_info: vec![
            20170810, 20180210, 20180810, 20190210, 20190810, 20200210, //
            20170813, 20180213, 20180813, 20190213, 20190813, 20200213, //
            1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
        ],
        redem_coupon: vec![0.0; 5],
        knock_barrier_flag: vec![0, 0],
        best_worst_flag: 1,
        be_ko_hitted: vec![0, 0, 0, 1],
        be_ki_hitted: 0,
        n_coupon: 6,
        coupon_barrier: vec![0.0; 6],
        coupon: vec![0.01; 6],
        coupon_dates_info: vec![
            20170810, 20180210, 20180810, 20190210, 20190810, 20200210, //
            20170813, 20180213, 20180813, 20190213, 20190813, 20200213,
        ],
        coupon_barrier_flag: 0,
        be_coupon_barrier_hitted: 0,
        n_trials: 10000.0,
        pay_off_limit: vec![1.0, 100.0],
        sc: vec![244.09, 244.09, 244.09, 0.0],
        coupon_sc: vec![244.09, 244.09, 244.09, 0.0],
        fl_long_info: vec![1, 1, 33, 33, 96, 0, 2, 1, 0, 12],
        fl_curve_term: FL_CURVE_TERM.to_vec(),
        fl_curve_rate: [FL_CURVE_RATE, FL_CURVE_RATE].concat(),
        fl_curve_date: history_dates(),
        history_rate: vec![0.012; 94],
        fl_ref_rate_period: 0.25,
        fl_reset_fix_date_info: reset_fix_dates(),
        fl_coupon_date_info: vec![
            20170211, 20170511, 20170811, 20171111, 20180211, 20180511, 20180811, 20181111,
            20190211, 20190511, 20190811, 20191111, //
            20170511, 20170811, 20171111, 20180211, 20180511, 20180811, 20181111, 20190211,
            20190511, 20190811, 20191111, 20200211, //
            20170514, 20170814, 20171114, 20180214, 20180514, 20180814, 20181114, 20190214,
            20190514, 20190814, 20191114, 20200214,
        ],
        fl_coupon_info: coupon_info(),
        calc_flag: vec![0, 1, 0],
    }
}

/// Strike levels 0.9 / 0.8 / 0.7, six dates each, repeated per asset
fn strike_grid() -> Vec<f64> {
    let per_asset: Vec<f64> = [0.9, 0.8, 0.7]
        .iter()
        .flat_map(|level| std::iter::repeat(*level).take(6))
        .collect();
    per_asset.repeat(3)
}

/// Consecutive calendar days 2017-05-04 ..= 2017-08-07 as yyyymmdd
fn history_dates() -> Vec<i32> {
    let months: [(i32, i32, i32); 4] = [(5, 4, 31), (6, 1, 30), (7, 1, 31), (8, 1, 7)];
    months
        .iter()
        .flat_map(|&(month, first, last)| (first..=last).map(move |day| 20170000 + month * 100 + day))
        .collect()
}

/// Reset/fixing blocks in the order the model reads them
fn reset_fix_dates() -> Vec<i32> {
    const RESET: [i32; 12] = [
        20170210, 20170510, 20170810, 20171110, 20180210, 20180510, 20180810, 20181110,
        20190210, 20190510, 20190810, 20191110,
    ];
    const END: [i32; 12] = [
        20170510, 20170810, 20171110, 20180210, 20180510, 20180810, 20181110, 20190210,
        20190510, 20190810, 20191110, 20200210,
    ];
    [&RESET[..], &[5; 12][..], &RESET[..], &END[..], &[5; 12][..]].concat()
}

/// Notional flags and spreads, then one fixed first coupon
fn coupon_info() -> Vec<f64> {
    let mut info = vec![1.0; 12];
    info.extend([0.0; 12]);
    info.push(0.0275);
    info.extend([0.0; 11]);
    info
}

/// Year fractions of the two floating-leg curves (33 points each)
///
/// The second curve repeats the first except at two points.
const FL_CURVE_TERM: [f64; 66] = [
    0.00277777777777778, 0.0305555555555556, 0.0444444444444444, 0.0694444444444444,
    0.0944444444444444, 0.180555555555556, 0.266666666666667, 0.35, 0.436111111111111,
    0.519444444444444, 0.605555555555556, 0.691666666666667, 0.769444444444444,
    0.855555555555556, 0.938888888888889, 1.025, 1.28055555555556, 1.53333333333333,
    1.78055555555556, 2.03611111111111, 3.05, 4.06111111111111, 5.07222222222222,
    6.08333333333333, 7.09722222222222, 8.10833333333333, 9.11944444444445,
    10.1305555555556, 11.1444444444444, 12.1555555555556, 15.1916666666667, 20.25,
    25.3083333333333, //
    0.00277777777777778, 0.0305555555555556, 4.44444444444444, 0.0694444444444444,
    0.0944444444444444, 0.180555555555556, 0.266666666666667, 0.35, 0.436111111111111,
    0.519444444444444, 0.605555555555556, 0.691666666666667, 0.769444444444444,
    0.855555555555556, 0.938888888888889, 1.025, 1.28055555555556, 1.53333333333333,
    1.78055555555556, 2.03611111111111, 3.05, 4.06111111111111, 5.07222222222222,
    6.08333333333333, 7.09722222222222, 8.10833333333333, 9.11944444444445,
    10.1305555555556, 11.1444444444444, 2.1555555555556, 15.1916666666667, 20.25,
    25.3083333333333,
];

/// Zero rates of one floating-leg curve; both curves share them
const FL_CURVE_RATE: &[f64] = &[
    0.000199999944454987, 0.000247999402094017, 0.000253973827461869, 0.000261417484391979,
    0.000263593201030217, 0.000309603332498718, 0.000318054959593167, 0.00032995743123133,
    0.000342155904429004, 0.000358541052950071, 0.000371402197953929, 0.000379037316291144,
    0.000387205256902421, 0.000435551859318853, 0.000443391895247618, 0.000428842049914623,
    0.000524619289484804, 0.000666865851465922, 0.000860128196610481, 0.00111350106037003,
    0.00262895780164227, 0.00463910894529559, 0.00652748072571885, 0.00820906109770577,
    0.00961813305324175, 0.0107469203596044, 0.0116807372490792, 0.0124822954530104,
    0.0131860191326933, 0.0137800580903817, 0.0150255821288824, 0.0160629656156907,
    0.0163259697787702,
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fx_legs_share_curve_size() {
        let fx = fx_forward();
        assert_eq!(fx.buy.curve_year_frac.len(), 10);
        assert_eq!(fx.buy.market_data.len(), 10);
        assert_eq!(fx.sell.curve_year_frac.len(), 10);
        assert_eq!(fx.sell.market_data.len(), 10);
    }

    #[test]
    fn test_bond_schedule_lengths() {
        let bond = fixed_rate_bond();
        assert_eq!(bond.payment_dates.len(), 12);
        assert_eq!(bond.real_start_dates.len(), 12);
        assert_eq!(bond.real_end_dates.len(), 12);
        assert_eq!(bond.girr_tenor_days.len(), bond.girr_rates.len());
        assert_eq!(bond.csr_tenor_days.len(), bond.csr_rates.len());
        assert_eq!(&bond.real_start_dates[1..], &bond.payment_dates[..11]);
    }

    #[test]
    fn test_swap_array_sizes() {
        let swap = hifive_swap();
        assert_eq!(swap.x.len(), 54);
        assert_eq!(&swap.x[..7], &[0.9, 0.9, 0.9, 0.9, 0.9, 0.9, 0.8]);
        assert_eq!(swap.local_vol_surface.len(), 18);
        assert_eq!(swap.pay_off_slope.iter().filter(|v| **v == 1.0).count(), 4);
        assert_eq!(swap.pay_off_slope[7], 1.0);
        assert_eq!(swap.dates_info.len(), 24);
        assert_eq!(swap.fl_curve_term.len(), 66);
        assert_eq!(swap.fl_curve_rate.len(), 66);
        assert_eq!(swap.fl_reset_fix_date_info.len(), 60);
        assert_eq!(swap.fl_coupon_date_info.len(), 36);
        assert_eq!(swap.pv01_capacity().unwrap(), 66);
    }

    #[test]
    fn test_swap_history_dates() {
        let swap = hifive_swap();
        assert_eq!(swap.fl_curve_date.len(), 96);
        assert_eq!(swap.fl_curve_date.first(), Some(&20170504));
        assert_eq!(swap.fl_curve_date[28], 20170601);
        assert_eq!(swap.fl_curve_date.last(), Some(&20170807));
        assert_eq!(swap.history_rate.len(), 94);
    }

    #[test]
    fn test_swap_coupon_info() {
        let info = coupon_info();
        assert_eq!(info.len(), 36);
        assert_eq!(info[11], 1.0);
        assert_eq!(info[12], 0.0);
        assert_eq!(info[24], 0.0275);
    }
}
