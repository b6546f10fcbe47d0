//! # Calculate and Estimate Subcommands
//!
//! `calculate` runs the rate cascade for an explicit tier and prints the
//! audit breakdown. `estimate` resolves the tier from the stored partner
//! record and prints the net preview.

use anyhow::Result;
use clap::Args;

use unitrack_commission::{calculate_commission, CommissionInputs};
use unitrack_core::{PartnerId, PartnerTier};

use crate::context::{load_config, open_engine};
use crate::GlobalOptions;

/// Override and bonus keys shared by `calculate` and `estimate`.
#[derive(Args, Debug, Clone, Default)]
pub struct OverrideArgs {
    /// University id, matched exactly (e.g. university_of_malaya).
    #[arg(long)]
    pub university: Option<String>,
    /// Program name, matched case-insensitively.
    #[arg(long)]
    pub program: Option<String>,
    /// Student nationality, matched case-insensitively.
    #[arg(long)]
    pub nationality: Option<String>,
}

impl OverrideArgs {
    fn inputs(&self) -> CommissionInputs<'_> {
        CommissionInputs {
            university_id: self.university.as_deref(),
            program_name: self.program.as_deref(),
            nationality: self.nationality.as_deref(),
        }
    }
}

/// Tuition must be a finite, non-negative amount.
fn parse_tuition(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|e| format!("invalid tuition {s:?}: {e}"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("tuition must be a finite amount >= 0, got {s}"));
    }
    Ok(value)
}

/// Arguments for `unitrack calculate`.
#[derive(Args, Debug)]
pub struct CalculateArgs {
    /// Annual tuition fee.
    #[arg(long, value_parser = parse_tuition)]
    pub tuition: f64,
    /// Partner tier (bronze, silver, gold, platinum).
    #[arg(long, default_value = "bronze")]
    pub tier: PartnerTier,
    #[command(flatten)]
    pub overrides: OverrideArgs,
    /// Print the full result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `unitrack estimate`.
#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Annual tuition fee.
    #[arg(long, value_parser = parse_tuition)]
    pub tuition: f64,
    /// Partner id as stored in the snapshot.
    #[arg(long)]
    pub partner: String,
    #[command(flatten)]
    pub overrides: OverrideArgs,
    /// Print the estimate as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute `unitrack calculate`.
pub fn run_calculate(args: &CalculateArgs, opts: &GlobalOptions) -> Result<u8> {
    let config = load_config(opts)?;
    let result = calculate_commission(args.tuition, args.tier, &args.overrides.inputs(), &config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for line in &result.breakdown {
            println!("{line}");
        }
    }
    Ok(0)
}

/// Execute `unitrack estimate`.
pub fn run_estimate(args: &EstimateArgs, opts: &GlobalOptions) -> Result<u8> {
    let engine = open_engine(opts)?;
    let partner = PartnerId::new(args.partner.as_str());
    let estimate = engine.estimate_commission(args.tuition, &partner, &args.overrides.inputs());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        println!("Partner: {partner}");
        println!("  Tier: {}", estimate.tier);
        println!("  Rate: {:.2}%", estimate.rate * 100.0);
        println!("  Estimated commission: {:.2}", estimate.estimated_amount);
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct CalculateCli {
        #[command(flatten)]
        args: CalculateArgs,
    }

    #[derive(Parser, Debug)]
    struct EstimateCli {
        #[command(flatten)]
        args: EstimateArgs,
    }

    #[test]
    fn tuition_parser_accepts_amounts() {
        assert_eq!(parse_tuition("45000").unwrap(), 45000.0);
        assert_eq!(parse_tuition("0").unwrap(), 0.0);
        assert_eq!(parse_tuition(" 1250.5 ").unwrap(), 1250.5);
    }

    #[test]
    fn tuition_parser_rejects_non_finite_and_negative() {
        for bad in ["NaN", "nan", "inf", "-inf", "-1000", "abc", ""] {
            assert!(parse_tuition(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn calculate_rejects_bad_tuition_at_parse_time() {
        let nan = ["calculate", "--tuition", "NaN", "--tier", "gold"];
        assert!(CalculateCli::try_parse_from(nan).is_err());
        assert!(CalculateCli::try_parse_from(["calculate", "--tuition=-1000"]).is_err());
        let ok = CalculateCli::try_parse_from(["calculate", "--tuition", "45000", "--tier", "Gold"])
            .unwrap();
        assert_eq!(ok.args.tuition, 45000.0);
        assert_eq!(ok.args.tier, PartnerTier::Gold);
    }

    #[test]
    fn estimate_rejects_bad_tuition_at_parse_time() {
        let inf = ["estimate", "--tuition", "inf", "--partner", "p1"];
        assert!(EstimateCli::try_parse_from(inf).is_err());
        let ok = EstimateCli::try_parse_from(["estimate", "--tuition", "50000", "--partner", "p1"])
            .unwrap();
        assert_eq!(ok.args.tuition, 50000.0);
    }
}
