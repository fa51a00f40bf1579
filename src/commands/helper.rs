use crate::accounts::{self, validate_accounts, AccountPair};
use crate::commands::Out;
use crate::model::mint::MintColumns;
use crate::model::Records;
use crate::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// What a `mapping_helper` run wrote.
#[derive(Debug, Clone, Serialize)]
pub struct HelperSummary {
    pub path: PathBuf,
    pub accounts: Vec<AccountPair>,
}

/// Writes an account mapping file to `helper` listing every account found in `input`, each mapped
/// to itself. The user edits the `Monarch` column and passes the file back with
/// `--account-mapping-translate`.
pub fn mapping_helper(input: &Path, helper: &Path) -> Result<Out<HelperSummary>> {
    info!("Reading input file: {}", input.display());
    let records = Records::load(input)?;
    MintColumns::resolve(&records)?;
    validate_accounts(&records)?;

    let pairs = accounts::helper_pairs(&records)?;
    for pair in &pairs {
        info!("Account: {}", pair.source());
    }
    info!(
        "Writing account mapping helper file to {}",
        helper.display()
    );
    accounts::write_helper(helper, &pairs)?;

    Ok(Out::new(
        format!(
            "Wrote {} accounts to {}, edit the Monarch column and pass it to \
            --account-mapping-translate",
            pairs.len(),
            helper.display()
        ),
        HelperSummary {
            path: helper.to_path_buf(),
            accounts: pairs,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::convert;
    use crate::test::{mint_csv, TestEnv};
    use std::num::NonZeroUsize;

    #[test]
    fn test_helper_lists_accounts_once() {
        let env = TestEnv::new();
        let input = env.write("mint.csv", &mint_csv(&["Chase", "Amex", "Chase"]));
        let helper = env.path("accounts.csv");

        let out = mapping_helper(&input, &helper).unwrap();
        assert_eq!(out.structure().unwrap().accounts.len(), 2);
        let rows = env.read_rows(&helper);
        assert_eq!(
            rows,
            vec![
                vec![String::from("Chase"), String::from("Chase")],
                vec![String::from("Amex"), String::from("Amex")],
            ]
        );
    }

    #[test]
    fn test_helper_does_not_write_chunks() {
        let env = TestEnv::new();
        let input = env.write("mint.csv", &mint_csv(&["Chase"]));
        mapping_helper(&input, &env.path("accounts.csv")).unwrap();
        assert_eq!(env.list(env.root()), vec!["accounts.csv", "mint.csv"]);
    }

    #[test]
    fn test_helper_then_translate_round_trip() {
        let env = TestEnv::new();
        let input = env.write("mint.csv", &mint_csv(&["Chase", "Amex", "Chase"]));
        let helper = env.path("accounts.csv");
        mapping_helper(&input, &helper).unwrap();

        let plain = env.path("plain");
        let translated = env.path("translated");
        let max_rows = NonZeroUsize::new(5000).unwrap();
        convert(&input, &plain, None, max_rows, false).unwrap();
        convert(&input, &translated, Some(helper.as_path()), max_rows, false).unwrap();

        let files = env.list(&plain);
        let translated_files = env.list(&translated);
        assert_eq!(files, translated_files);
        for file in files {
            assert_eq!(
                env.read_rows(plain.join(&file)),
                env.read_rows(translated.join(&file))
            );
        }
    }
}
