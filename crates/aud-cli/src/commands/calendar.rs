use aud_core::entities::CalendarFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{CalendarArgs, CalendarCommands};
use crate::context::AppContext;
use crate::output::output;

/// Handle `auditor calendar <subcommand>`.
pub async fn handle(
    action: &CalendarCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CalendarCommands::LargeTaxpayers(args) => {
            let calendar = ctx.client.large_taxpayer_calendar(filter(args)?).await?;
            output(&calendar, flags.format)
        }
        CalendarCommands::LegalEntities(args) => {
            let calendar = ctx.client.legal_entity_calendar(filter(args)?).await?;
            output(&calendar, flags.format)
        }
    }
}

fn filter(args: &CalendarArgs) -> anyhow::Result<Option<CalendarFilter>> {
    match (args.year, args.digit) {
        (Some(year), Some(digit)) => Ok(Some(CalendarFilter::new(year, digit)?)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use aud_core::entities::CalendarFilter;
    use pretty_assertions::assert_eq;

    use super::filter;
    use crate::cli::subcommands::CalendarArgs;

    #[test]
    fn no_flags_means_complete_calendar() {
        let args = CalendarArgs {
            year: None,
            digit: None,
        };
        assert_eq!(filter(&args).expect("filter"), None);
    }

    #[test]
    fn digit_above_nine_is_rejected_before_any_request() {
        let args = CalendarArgs {
            year: Some(2025),
            digit: Some(12),
        };
        assert!(filter(&args).is_err());

        let args = CalendarArgs {
            year: Some(2025),
            digit: Some(9),
        };
        assert_eq!(
            filter(&args).expect("filter"),
            Some(CalendarFilter {
                tax_year: 2025,
                nit_last_digit: 9
            })
        );
    }
}
