use clap::Parser;

use crate::render;
use crate::sources::openprescribing::OpenPrescribingClient;
use crate::transform;

/// Look up a drug on OpenPrescribing: its chemical name, then for each month
/// on record the Integrated Care Board(s) that prescribed it most.
#[derive(Debug, Parser)]
#[command(name = "openrx", version)]
pub struct Cli {
    /// 9-character BNF chemical code, e.g. 0407010AD
    pub code: String,
}

/// Runs the two lookups in sequence and returns the stdout payload: the
/// resolved name followed by one line per per-date spending leader.
pub async fn run(cli: Cli) -> anyhow::Result<String> {
    let client = OpenPrescribingClient::new()?;

    let name = client.chemical_name(&cli.code).await?;
    let rows = client.spending_by_icb(&cli.code).await?;

    let records = transform::spending::from_api_rows(rows);
    let leaders = transform::spending::daily_leaders(records);

    Ok(render::text::report(&name, &leaders))
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn parses_single_positional_code() {
        let cli = Cli::try_parse_from(["openrx", "0407010AD"]).expect("valid invocation");
        assert_eq!(cli.code, "0407010AD");
    }

    #[test]
    fn requires_a_code_argument() {
        assert!(Cli::try_parse_from(["openrx"]).is_err());
    }

    #[test]
    fn rejects_extra_positional_arguments() {
        assert!(Cli::try_parse_from(["openrx", "0407010AD", "extra"]).is_err());
    }
}
