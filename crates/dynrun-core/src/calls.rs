//! Call-shape catalog
//!
//! One descriptor and one typed wrapper per supported entry point. Each
//! wrapper turns a typed input into `ArgValue`s in descriptor order, invokes
//! the function and decodes the output slots into a typed result.
//!
//! Output capacities are fixed per call site. They come from the native
//! contracts and cannot be derived from anything at run time.

use crate::caller::NativeFunction;
use crate::error::{Error, MarshalError, Result};
use crate::output::SensitivityCurve;
use crate::projector::NativeStructInput;
use crate::types::ScalarType::{CLong, Double, Int, Long, Size};
use crate::types::{ArgValue, CallDescriptor, CallOutcome, ReturnKind, ReturnValue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// `resultNetPvFxSensitivity`: net PV and FX sensitivity
pub const FX_NET_PV_CAPACITY: usize = 2;
/// `resultGirrDelta` for the FX forward
pub const FX_GIRR_CAPACITY: usize = 25;
/// FX forward `calType` that fills the GIRR delta curve
pub const FX_CAL_TYPE_GIRR: i32 = 2;

pub const BOND_GIRR_CAPACITY: usize = 50;
pub const BOND_CSR_CAPACITY: usize = 50;
/// Bond `calType` that fills both sensitivity curves
pub const BOND_CAL_TYPE_SENSITIVITIES: i32 = 3;

pub const STOCK_RESULT_CAPACITY: usize = 1;

pub const SWAP_ELS_PROB_CAPACITY: usize = 16;
pub const SWAP_ELS_COUPON_PROB_CAPACITY: usize = 12;
pub const SWAP_IR_PROB_CAPACITY: usize = 24;
/// Initial `ResultPrice` contents; the callee overwrites all three
pub const SWAP_RESULT_PRICE_SEED: [f64; 3] = [1.1, 2.2, 3.3];

/// Every supported call shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallShape {
    Math(MathOp),
    PrintType,
    UpdateDoubleArr,
    PrintStruct,
    StockPricing,
    FxForwardPricing,
    FixedRateBondPricing,
    HiFiveSwapMc,
}

impl CallShape {
    /// Descriptor for this shape bound to `function`
    pub fn descriptor(&self, function: &str) -> CallDescriptor {
        match self {
            CallShape::Math(_) => math_descriptor(function),
            CallShape::PrintType => print_type_descriptor(function),
            CallShape::UpdateDoubleArr => update_double_arr_descriptor(function),
            CallShape::PrintStruct => print_struct_descriptor(function),
            CallShape::StockPricing => stock_pricing_descriptor(function),
            CallShape::FxForwardPricing => fx_forward_pricing_descriptor(function),
            CallShape::FixedRateBondPricing => fixed_rate_bond_pricing_descriptor(function),
            CallShape::HiFiveSwapMc => hifive_swap_mc_descriptor(function),
        }
    }
}

// ---------------------------------------------------------------------------
// Scalar binary ops
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MathOp {
    Sum,
    Sub,
    Mul,
    Div,
}

impl MathOp {
    pub const ALL: [MathOp; 4] = [MathOp::Sum, MathOp::Sub, MathOp::Mul, MathOp::Div];

    /// Exported symbol name
    pub fn symbol(&self) -> &'static str {
        match self {
            MathOp::Sum => "Sum",
            MathOp::Sub => "Sub",
            MathOp::Mul => "Mul",
            MathOp::Div => "Div",
        }
    }
}

impl fmt::Display for MathOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `double f(double a, double b)`
pub fn math_descriptor(function: &str) -> CallDescriptor {
    CallDescriptor::new(function)
        .value("a", Double)
        .value("b", Double)
        .returns(ReturnKind::Double)
}

pub fn call_math(f: &NativeFunction<'_>, a: f64, b: f64) -> Result<f64> {
    let descriptor = math_descriptor(f.name());
    // SAFETY: two doubles in, one double out; no memory is shared
    let outcome = unsafe { f.invoke(&descriptor, vec![a.into(), b.into()]) }?;
    returned_f64(&outcome).map_err(|cause| Error::native_call(f.name(), cause))
}

// ---------------------------------------------------------------------------
// Mixed arrays + pointer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrintTypeInput {
    pub strings: Vec<String>,
    pub ints: Vec<i32>,
    pub doubles: Vec<f64>,
    pub longs: Vec<i64>,
    /// Value behind the `double*`; the callee increments it
    pub value: f64,
}

/// `void f(const char* a[], const int* b, const double* c, const long* d,
/// double* e, size_t a_size, size_t b_size, size_t c_size, size_t d_size)`
pub fn print_type_descriptor(function: &str) -> CallDescriptor {
    CallDescriptor::new(function)
        .string_array("a")
        .array("b", Int)
        .array("c", Double)
        .array("d", CLong)
        .out_scalar("e", Double)
        .value("a_size", Size)
        .value("b_size", Size)
        .value("c_size", Size)
        .value("d_size", Size)
}

impl PrintTypeInput {
    fn args(&self) -> Vec<ArgValue> {
        vec![
            ArgValue::StrArray(self.strings.clone()),
            ArgValue::IntArray(self.ints.clone()),
            ArgValue::DoubleArray(self.doubles.clone()),
            ArgValue::LongArray(self.longs.clone()),
            ArgValue::Double(self.value),
            ArgValue::Size(self.strings.len()),
            ArgValue::Size(self.ints.len()),
            ArgValue::Size(self.doubles.len()),
            ArgValue::Size(self.longs.len()),
        ]
    }
}

/// Returns the pointer value after the call
pub fn call_print_type(f: &NativeFunction<'_>, input: &PrintTypeInput) -> Result<f64> {
    let descriptor = print_type_descriptor(f.name());
    // SAFETY: every array is passed with its own length
    let outcome = unsafe { f.invoke(&descriptor, input.args()) }?;
    output_f64(&outcome, "e").map_err(|cause| Error::native_call(f.name(), cause))
}

// ---------------------------------------------------------------------------
// In-place array update
// ---------------------------------------------------------------------------

/// `void f(double* a, size_t a_size)`
pub fn update_double_arr_descriptor(function: &str) -> CallDescriptor {
    CallDescriptor::new(function)
        .out_array("a", Double)
        .value("a_size", Size)
}

/// Returns the array as the callee left it
pub fn call_update_double_arr(f: &NativeFunction<'_>, values: &[f64]) -> Result<Vec<f64>> {
    let descriptor = update_double_arr_descriptor(f.name());
    let args = vec![
        ArgValue::DoubleArray(values.to_vec()),
        ArgValue::Size(values.len()),
    ];
    // SAFETY: the callee writes at most `a_size` elements
    let outcome = unsafe { f.invoke(&descriptor, args) }?;
    output_doubles(&outcome, "a")
        .map(<[f64]>::to_vec)
        .map_err(|cause| Error::native_call(f.name(), cause))
}

// ---------------------------------------------------------------------------
// Struct by reference
// ---------------------------------------------------------------------------

/// `void f(struct MyStruct* s)`
pub fn print_struct_descriptor(function: &str) -> CallDescriptor {
    CallDescriptor::new(function).structure("s")
}

pub fn call_print_struct(f: &NativeFunction<'_>, input: &NativeStructInput) -> Result<()> {
    let descriptor = print_struct_descriptor(f.name());
    // SAFETY: the projected struct outlives the call
    unsafe { f.invoke(&descriptor, vec![ArgValue::Struct(input.clone())]) }?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Stock
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPricingInput {
    pub amount: f64,
    pub price: f64,
    pub base_price: f64,
    pub beta: f64,
    pub fx: f64,
    /// Working buffer handed to the callee
    pub p: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPricingResult {
    pub return_code: i64,
    pub price: f64,
    pub p: Vec<f64>,
}

/// `long f(double amt, double price, double basePrice, double beta,
/// double fx, double* p, double* ResultPrice)`
pub fn stock_pricing_descriptor(function: &str) -> CallDescriptor {
    CallDescriptor::new(function)
        .value("amt", Double)
        .value("price", Double)
        .value("basePrice", Double)
        .value("beta", Double)
        .value("fx", Double)
        .out_array("p", Double)
        .out_array("ResultPrice", Double)
        .returns(ReturnKind::CLong)
}

pub fn call_stock_pricing(
    f: &NativeFunction<'_>,
    input: &StockPricingInput,
) -> Result<StockPricingResult> {
    let descriptor = stock_pricing_descriptor(f.name());
    let args = vec![
        input.amount.into(),
        input.price.into(),
        input.base_price.into(),
        input.beta.into(),
        input.fx.into(),
        ArgValue::DoubleArray(input.p.clone()),
        ArgValue::DoubleArray(vec![0.0; STOCK_RESULT_CAPACITY]),
    ];
    // SAFETY: ResultPrice holds the single value the callee writes
    let outcome = unsafe { f.invoke(&descriptor, args) }?;

    let decode = || -> std::result::Result<StockPricingResult, MarshalError> {
        Ok(StockPricingResult {
            return_code: returned_i64(&outcome)?,
            price: first(output_doubles(&outcome, "ResultPrice")?, "ResultPrice")?,
            p: output_doubles(&outcome, "p")?.to_vec(),
        })
    };
    decode().map_err(|cause| Error::native_call(f.name(), cause))
}

// ---------------------------------------------------------------------------
// FX forward
// ---------------------------------------------------------------------------

/// One side of an FX forward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FxLeg {
    pub currency: String,
    pub notional: f64,
    pub day_count_basis: i32,
    pub discount_curve: String,
    pub curve_year_frac: Vec<f64>,
    pub market_data: Vec<f64>,
}

impl FxLeg {
    fn push_args(&self, args: &mut Vec<ArgValue>) {
        args.push(ArgValue::Str(self.currency.clone()));
        args.push(ArgValue::Double(self.notional));
        args.push(ArgValue::Int(self.day_count_basis));
        args.push(ArgValue::Str(self.discount_curve.clone()));
        args.push(ArgValue::Int(self.curve_year_frac.len() as i32));
        args.push(ArgValue::DoubleArray(self.curve_year_frac.clone()));
        args.push(ArgValue::DoubleArray(self.market_data.clone()));
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FxForwardInput {
    pub maturity_date: i64,
    pub revaluation_date: i64,
    pub exchange_rate: f64,
    pub buy: FxLeg,
    pub sell: FxLeg,
    pub cal_type: i32,
    pub log_yn: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FxForwardResult {
    pub net_pv: f64,
    pub fx_sensitivity: f64,
    /// Present when `cal_type == FX_CAL_TYPE_GIRR`
    pub girr_delta: Option<SensitivityCurve>,
}

fn fx_leg_params(descriptor: CallDescriptor, side: &str) -> CallDescriptor {
    descriptor
        .string(format!("{side}SideCurrency"))
        .value(
            if side == "buy" { "notionalForeign" } else { "notionalDomestic" },
            Double,
        )
        .value(format!("{side}SideDCB"), Int)
        .string(format!("{side}SideDcCurve"))
        .value(format!("{side}CurveSize"), Int)
        .array(format!("{side}CurveYearFrac"), Double)
        .array(format!("{side}MarketData"), Double)
}

pub fn fx_forward_pricing_descriptor(function: &str) -> CallDescriptor {
    let descriptor = CallDescriptor::new(function)
        .value("maturityDate", Long)
        .value("revaluationDate", Long)
        .value("exchangeRate", Double);
    fx_leg_params(fx_leg_params(descriptor, "buy"), "sell")
        .value("calType", Int)
        .value("logYn", Int)
        .out_array("resultNetPvFxSensitivity", Double)
        .out_array("resultGirrDelta", Double)
}

impl FxForwardInput {
    fn args(&self) -> Vec<ArgValue> {
        let mut args = vec![
            ArgValue::Long(self.maturity_date),
            ArgValue::Long(self.revaluation_date),
            ArgValue::Double(self.exchange_rate),
        ];
        self.buy.push_args(&mut args);
        self.sell.push_args(&mut args);
        args.extend([
            ArgValue::Int(self.cal_type),
            ArgValue::Int(self.log_yn),
            ArgValue::DoubleArray(vec![0.0; FX_NET_PV_CAPACITY]),
            ArgValue::DoubleArray(vec![0.0; FX_GIRR_CAPACITY]),
        ]);
        args
    }
}

pub fn call_fx_forward_pricing(
    f: &NativeFunction<'_>,
    input: &FxForwardInput,
) -> Result<FxForwardResult> {
    let descriptor = fx_forward_pricing_descriptor(f.name());
    // SAFETY: result buffers are sized to the pricing contract
    let outcome = unsafe { f.invoke(&descriptor, input.args()) }?;

    let decode = || -> std::result::Result<FxForwardResult, MarshalError> {
        let net_pv = output_doubles(&outcome, "resultNetPvFxSensitivity")?;
        let girr_delta = if input.cal_type == FX_CAL_TYPE_GIRR {
            Some(SensitivityCurve::decode(output_doubles(
                &outcome,
                "resultGirrDelta",
            )?)?)
        } else {
            None
        };
        Ok(FxForwardResult {
            net_pv: first(net_pv, "resultNetPvFxSensitivity")?,
            fx_sensitivity: net_pv.get(1).copied().unwrap_or_default(),
            girr_delta,
        })
    };
    decode().map_err(|cause| Error::native_call(f.name(), cause))
}

// ---------------------------------------------------------------------------
// Fixed-rate bond
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedRateBondInput {
    pub evaluation_date: i32,
    pub settlement_days: i32,
    pub issue_date: i32,
    pub maturity_date: i32,
    pub notional: f64,
    pub coupon_rate: f64,
    pub coupon_day_counter: i32,
    pub payment_dates: Vec<i32>,
    pub real_start_dates: Vec<i32>,
    pub real_end_dates: Vec<i32>,
    pub girr_tenor_days: Vec<i32>,
    pub girr_rates: Vec<f64>,
    pub girr_day_counter: i32,
    pub girr_interpolator: i32,
    pub girr_compounding: i32,
    pub girr_frequency: i32,
    pub spread_over_yield: f64,
    pub spread_over_yield_compounding: i32,
    pub spread_over_yield_day_counter: i32,
    pub csr_tenor_days: Vec<i32>,
    pub csr_rates: Vec<f64>,
    pub cal_type: i32,
    pub log_yn: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedRateBondResult {
    pub net_pv: f64,
    /// Present when `cal_type == BOND_CAL_TYPE_SENSITIVITIES`
    pub girr_delta: Option<SensitivityCurve>,
    pub csr_delta: Option<SensitivityCurve>,
}

pub fn fixed_rate_bond_pricing_descriptor(function: &str) -> CallDescriptor {
    CallDescriptor::new(function)
        .value("evaluationDate", Int)
        .value("settlementDays", Int)
        .value("issueDate", Int)
        .value("maturityDate", Int)
        .value("notional", Double)
        .value("couponRate", Double)
        .value("couponDayCounter", Int)
        .value("numberOfCoupons", Int)
        .array("paymentDates", Int)
        .array("realStartDates", Int)
        .array("realEndDates", Int)
        .value("numberOfGirrTenors", Int)
        .array("girrTenorDays", Int)
        .array("girrRates", Double)
        .value("girrDayCounter", Int)
        .value("girrInterpolator", Int)
        .value("girrCompounding", Int)
        .value("girrFrequency", Int)
        .value("spreadOverYield", Double)
        .value("spreadOverYieldCompounding", Int)
        .value("spreadOverYieldDayCounter", Int)
        .value("numberOfCsrTenors", Int)
        .array("csrTenorDays", Int)
        .array("csrRates", Double)
        .value("calType", Int)
        .value("logYn", Int)
        .out_array("resultGirrDelta", Double)
        .out_array("resultCsrDelta", Double)
        .returns(ReturnKind::Double)
}

impl FixedRateBondInput {
    fn args(&self) -> Vec<ArgValue> {
        vec![
            ArgValue::Int(self.evaluation_date),
            ArgValue::Int(self.settlement_days),
            ArgValue::Int(self.issue_date),
            ArgValue::Int(self.maturity_date),
            ArgValue::Double(self.notional),
            ArgValue::Double(self.coupon_rate),
            ArgValue::Int(self.coupon_day_counter),
            ArgValue::Int(self.payment_dates.len() as i32),
            ArgValue::IntArray(self.payment_dates.clone()),
            ArgValue::IntArray(self.real_start_dates.clone()),
            ArgValue::IntArray(self.real_end_dates.clone()),
            ArgValue::Int(self.girr_tenor_days.len() as i32),
            ArgValue::IntArray(self.girr_tenor_days.clone()),
            ArgValue::DoubleArray(self.girr_rates.clone()),
            ArgValue::Int(self.girr_day_counter),
            ArgValue::Int(self.girr_interpolator),
            ArgValue::Int(self.girr_compounding),
            ArgValue::Int(self.girr_frequency),
            ArgValue::Double(self.spread_over_yield),
            ArgValue::Int(self.spread_over_yield_compounding),
            ArgValue::Int(self.spread_over_yield_day_counter),
            ArgValue::Int(self.csr_tenor_days.len() as i32),
            ArgValue::IntArray(self.csr_tenor_days.clone()),
            ArgValue::DoubleArray(self.csr_rates.clone()),
            ArgValue::Int(self.cal_type),
            ArgValue::Int(self.log_yn),
            ArgValue::DoubleArray(vec![0.0; BOND_GIRR_CAPACITY]),
            ArgValue::DoubleArray(vec![0.0; BOND_CSR_CAPACITY]),
        ]
    }
}

pub fn call_fixed_rate_bond_pricing(
    f: &NativeFunction<'_>,
    input: &FixedRateBondInput,
) -> Result<FixedRateBondResult> {
    let descriptor = fixed_rate_bond_pricing_descriptor(f.name());
    // SAFETY: result buffers are sized to the pricing contract
    let outcome = unsafe { f.invoke(&descriptor, input.args()) }?;

    let decode = || -> std::result::Result<FixedRateBondResult, MarshalError> {
        let net_pv = returned_f64(&outcome)?;
        if input.cal_type != BOND_CAL_TYPE_SENSITIVITIES {
            return Ok(FixedRateBondResult {
                net_pv,
                girr_delta: None,
                csr_delta: None,
            });
        }
        Ok(FixedRateBondResult {
            net_pv,
            girr_delta: Some(SensitivityCurve::decode(output_doubles(
                &outcome,
                "resultGirrDelta",
            )?)?),
            csr_delta: Some(SensitivityCurve::decode(output_doubles(
                &outcome,
                "resultCsrDelta",
            )?)?),
        })
    };
    decode().map_err(|cause| Error::native_call(f.name(), cause))
}

// ---------------------------------------------------------------------------
// HiFive swap (Monte-Carlo)
// ---------------------------------------------------------------------------

/// Inputs of `KISP_CalcHiFiveSwapMC`, in argument order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiFiveSwapInput {
    pub price_date: i32,
    pub notional_amt: f64,
    pub underlying_price: Vec<f64>,
    pub t_curve_info: Vec<f64>,
    pub curve_info: Vec<f64>,
    pub nt: Vec<i32>,
    pub t_vol: Vec<f64>,
    pub parity: Vec<f64>,
    pub local_vol_surface: Vec<f64>,
    pub n_vol: Vec<i32>,
    pub n_parity: Vec<i32>,
    pub underlying_corr: Vec<f64>,
    pub t_div: Vec<i32>,
    pub div: Vec<f64>,
    pub n_div: Vec<i32>,
    pub div_type_flag: Vec<i32>,
    pub fx_t_vol: Vec<f64>,
    pub fx_vol: Vec<f64>,
    pub fx_n_vol: Vec<i32>,
    pub fx_corr: Vec<f64>,
    pub quanto_flag: Vec<i32>,
    pub n_stock: i32,
    pub n_strike: i32,
    pub x: Vec<f64>,
    pub ko_barrier: Vec<f64>,
    pub ki_barrier: Vec<f64>,
    pub pay_off_slope: Vec<f64>,
    pub pay_off_amount: Vec<f64>,
    pub dates_info: Vec<i32>,
    pub redem_coupon: Vec<f64>,
    pub knock_barrier_flag: Vec<i32>,
    pub best_worst_flag: i32,
    pub be_ko_hitted: Vec<i32>,
    pub be_ki_hitted: i32,
    pub n_coupon: i32,
    pub coupon_barrier: Vec<f64>,
    pub coupon: Vec<f64>,
    pub coupon_dates_info: Vec<i32>,
    pub coupon_barrier_flag: i32,
    pub be_coupon_barrier_hitted: i32,
    pub n_trials: f64,
    pub pay_off_limit: Vec<f64>,
    pub sc: Vec<f64>,
    pub coupon_sc: Vec<f64>,
    pub fl_long_info: Vec<i32>,
    pub fl_curve_term: Vec<f64>,
    pub fl_curve_rate: Vec<f64>,
    pub fl_curve_date: Vec<i32>,
    pub history_rate: Vec<f64>,
    pub fl_ref_rate_period: f64,
    pub fl_reset_fix_date_info: Vec<i32>,
    pub fl_coupon_date_info: Vec<i32>,
    pub fl_coupon_info: Vec<f64>,
    pub calc_flag: Vec<i32>,
}

impl HiFiveSwapInput {
    /// PV01 buffer size: `FLLongInfo[2] + FLLongInfo[3]`
    pub fn pv01_capacity(&self) -> std::result::Result<usize, MarshalError> {
        match self.fl_long_info.get(2..4) {
            Some(&[a, b]) if a >= 0 && b >= 0 => Ok(a as usize + b as usize),
            _ => Err(MarshalError::OutputLayout(format!(
                "FLLongInfo {:?} does not give a PV01 size",
                self.fl_long_info
            ))),
        }
    }

    fn args(&self) -> std::result::Result<Vec<ArgValue>, MarshalError> {
        let ints = |v: &Vec<i32>| ArgValue::IntArray(v.clone());
        let doubles = |v: &Vec<f64>| ArgValue::DoubleArray(v.clone());
        Ok(vec![
            ArgValue::Int(self.price_date),
            ArgValue::Double(self.notional_amt),
            doubles(&self.underlying_price),
            doubles(&self.t_curve_info),
            doubles(&self.curve_info),
            ints(&self.nt),
            doubles(&self.t_vol),
            doubles(&self.parity),
            doubles(&self.local_vol_surface),
            ints(&self.n_vol),
            ints(&self.n_parity),
            doubles(&self.underlying_corr),
            ints(&self.t_div),
            doubles(&self.div),
            ints(&self.n_div),
            ints(&self.div_type_flag),
            doubles(&self.fx_t_vol),
            doubles(&self.fx_vol),
            ints(&self.fx_n_vol),
            doubles(&self.fx_corr),
            ints(&self.quanto_flag),
            ArgValue::Int(self.n_stock),
            ArgValue::Int(self.n_strike),
            doubles(&self.x),
            doubles(&self.ko_barrier),
            doubles(&self.ki_barrier),
            doubles(&self.pay_off_slope),
            doubles(&self.pay_off_amount),
            ints(&self.dates_info),
            doubles(&self.redem_coupon),
            ints(&self.knock_barrier_flag),
            ArgValue::Int(self.best_worst_flag),
            ints(&self.be_ko_hitted),
            ArgValue::Int(self.be_ki_hitted),
            ArgValue::Int(self.n_coupon),
            doubles(&self.coupon_barrier),
            doubles(&self.coupon),
            ints(&self.coupon_dates_info),
            ArgValue::Int(self.coupon_barrier_flag),
            ArgValue::Int(self.be_coupon_barrier_hitted),
            ArgValue::Double(self.n_trials),
            doubles(&self.pay_off_limit),
            doubles(&self.sc),
            doubles(&self.coupon_sc),
            ints(&self.fl_long_info),
            doubles(&self.fl_curve_term),
            doubles(&self.fl_curve_rate),
            ints(&self.fl_curve_date),
            doubles(&self.history_rate),
            ArgValue::Double(self.fl_ref_rate_period),
            ints(&self.fl_reset_fix_date_info),
            ints(&self.fl_coupon_date_info),
            doubles(&self.fl_coupon_info),
            ints(&self.calc_flag),
            ArgValue::DoubleArray(vec![0.0; SWAP_ELS_PROB_CAPACITY]),
            ArgValue::DoubleArray(vec![0.0; SWAP_ELS_COUPON_PROB_CAPACITY]),
            ArgValue::DoubleArray(vec![0.0; SWAP_IR_PROB_CAPACITY]),
            ArgValue::DoubleArray(vec![0.0; self.pv01_capacity()?]),
            ArgValue::DoubleArray(SWAP_RESULT_PRICE_SEED.to_vec()),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiFiveSwapResult {
    pub return_code: i64,
    /// `ResultPrice[0..3]`; the first entry is the price
    pub result_price: Vec<f64>,
    pub els_prob_n_cf: Vec<f64>,
    pub els_coupon_prob_n_cf: Vec<f64>,
    pub ir_prob_n_cf: Vec<f64>,
    pub pv01: Vec<f64>,
}

impl HiFiveSwapResult {
    pub fn price(&self) -> Option<f64> {
        self.result_price.first().copied()
    }
}

pub fn hifive_swap_mc_descriptor(function: &str) -> CallDescriptor {
    CallDescriptor::new(function)
        .value("PriceDate", Int)
        .value("NotionalAMT", Double)
        .array("UnderlyingPrice", Double)
        .array("TCurveInfo", Double)
        .array("CurveInfo", Double)
        .array("NT", Int)
        .array("TVol", Double)
        .array("Parity", Double)
        .array("LocalVolSurface", Double)
        .array("NVol", Int)
        .array("NParity", Int)
        .array("UnderlyingCorr", Double)
        .array("TDiv", Int)
        .array("Div", Double)
        .array("NDiv", Int)
        .array("DivTypeFlag", Int)
        .array("FX_TVol", Double)
        .array("FX_Vol", Double)
        .array("FX_NVol", Int)
        .array("FX_Corr", Double)
        .array("QuantoFlag", Int)
        .value("NStock", Int)
        .value("NStrike", Int)
        .array("X", Double)
        .array("KO_Barrier", Double)
        .array("KI_Barrier", Double)
        .array("PayOffSlope", Double)
        .array("PayOffAmount", Double)
        .array("DatesInfo", Int)
        .array("RedemCoupon", Double)
        .array("KnockBarrierFlag", Int)
        .value("BestWorstFlag", Int)
        .array("BeKO_Hitted", Int)
        .value("BeKI_Hitted", Int)
        .value("NCoupon", Int)
        .array("CouponBarrier", Double)
        .array("Coupon", Double)
        .array("CouponDatesInfo", Int)
        .value("CouponBarrierFlag", Int)
        .value("BeCouponBarrierHitted", Int)
        .value("NTrials", Double)
        .array("PayOffLimit", Double)
        .array("SC", Double)
        .array("Coupon_SC", Double)
        .array("FLLongInfo", Int)
        .array("FLCurveTerm", Double)
        .array("FLCurveRate", Double)
        .array("FLCurveDate", Int)
        .array("HistoryRate", Double)
        .value("FLRefRatePeriod", Double)
        .array("FLResetFixDateInfo", Int)
        .array("FLCouponDateInfo", Int)
        .array("FLCouponInfo", Double)
        .array("CalcFlag", Int)
        .out_array("ELS_Prob_n_Cf", Double)
        .out_array("ELS_Coupon_Prob_n_Cf", Double)
        .out_array("IR_Prob_n_Cf", Double)
        .out_array("PV01", Double)
        .out_array("ResultPrice", Double)
        .returns(ReturnKind::CLong)
}

pub fn call_hifive_swap_mc(
    f: &NativeFunction<'_>,
    input: &HiFiveSwapInput,
) -> Result<HiFiveSwapResult> {
    let descriptor = hifive_swap_mc_descriptor(f.name());
    let args = input
        .args()
        .map_err(|cause| Error::native_call(f.name(), cause))?;
    // SAFETY: output buffers follow the model's sizing rules
    let outcome = unsafe { f.invoke(&descriptor, args) }?;

    let decode = || -> std::result::Result<HiFiveSwapResult, MarshalError> {
        Ok(HiFiveSwapResult {
            return_code: returned_i64(&outcome)?,
            result_price: output_doubles(&outcome, "ResultPrice")?.to_vec(),
            els_prob_n_cf: output_doubles(&outcome, "ELS_Prob_n_Cf")?.to_vec(),
            els_coupon_prob_n_cf: output_doubles(&outcome, "ELS_Coupon_Prob_n_Cf")?.to_vec(),
            ir_prob_n_cf: output_doubles(&outcome, "IR_Prob_n_Cf")?.to_vec(),
            pv01: output_doubles(&outcome, "PV01")?.to_vec(),
        })
    };
    decode().map_err(|cause| Error::native_call(f.name(), cause))
}

// ---------------------------------------------------------------------------
// Outcome accessors
// ---------------------------------------------------------------------------

fn output_doubles<'a>(
    outcome: &'a CallOutcome,
    name: &str,
) -> std::result::Result<&'a [f64], MarshalError> {
    match outcome.output(name) {
        Some(ArgValue::DoubleArray(values)) => Ok(values),
        _ => Err(MarshalError::MissingOutput(name.to_string())),
    }
}

fn output_f64(outcome: &CallOutcome, name: &str) -> std::result::Result<f64, MarshalError> {
    match outcome.output(name) {
        Some(ArgValue::Double(v)) => Ok(*v),
        _ => Err(MarshalError::MissingOutput(name.to_string())),
    }
}

fn first(values: &[f64], name: &str) -> std::result::Result<f64, MarshalError> {
    values
        .first()
        .copied()
        .ok_or_else(|| MarshalError::MissingOutput(name.to_string()))
}

fn returned_f64(outcome: &CallOutcome) -> std::result::Result<f64, MarshalError> {
    outcome
        .returned
        .as_f64()
        .ok_or_else(|| MarshalError::MissingOutput("return value".to_string()))
}

fn returned_i64(outcome: &CallOutcome) -> std::result::Result<i64, MarshalError> {
    match outcome.returned {
        ReturnValue::Void | ReturnValue::Double(_) => {
            Err(MarshalError::MissingOutput("return value".to_string()))
        }
        other => other
            .as_i64()
            .ok_or_else(|| MarshalError::MissingOutput("return value".to_string())),
    }
}
