use std::io::{self, Write};
use std::ops::Deref;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::debug;
use sidx_core::{
    BinIndexQueryBuilder, IndexKind, IndexQuery, IndexQueryBuilder, IntIndexQueryBuilder, Location,
    QueryDescriptor, RawIndexQueryBuilder, RawKeys,
};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Build a secondary index query and print its wire descriptor as JSON"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query an integer (_int) index
    Int {
        #[command(flatten)]
        common: QueryArgs,

        /// Exact match key
        #[arg(long, allow_negative_numbers = true, conflicts_with_all = ["start", "end"])]
        key: Option<i64>,

        /// Range start (inclusive)
        #[arg(long, allow_negative_numbers = true)]
        start: Option<i64>,

        /// Range end (inclusive)
        #[arg(long, allow_negative_numbers = true)]
        end: Option<i64>,
    },

    /// Query a binary (_bin) index
    Bin {
        #[command(flatten)]
        common: QueryArgs,

        /// Exact match key
        #[arg(long, conflicts_with_all = ["start", "end"])]
        key: Option<String>,

        /// Range start (inclusive)
        #[arg(long)]
        start: Option<String>,

        /// Range end (inclusive)
        #[arg(long)]
        end: Option<String>,

        /// Regex filter applied to index values on the server
        #[arg(long)]
        term_filter: Option<String>,
    },

    /// Query with wire-shaped keys and an explicit index kind
    Raw {
        #[command(flatten)]
        common: QueryArgs,

        /// Index kind
        #[arg(long, value_enum)]
        kind: KindArg,

        /// Exact match key
        #[arg(long, allow_hyphen_values = true)]
        key: Option<String>,

        /// Range start (inclusive)
        #[arg(long, allow_hyphen_values = true)]
        start: Option<String>,

        /// Range end (inclusive)
        #[arg(long, allow_hyphen_values = true)]
        end: Option<String>,

        /// Regex filter applied to index values on the server
        #[arg(long)]
        term_filter: Option<String>,

        /// Reject integer keys that are not decimal numbers
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Args)]
struct QueryArgs {
    /// Bucket name
    #[arg(short, long)]
    bucket: String,

    /// Bucket type (store default when omitted)
    #[arg(long)]
    bucket_type: Option<String>,

    /// Index name without the _int/_bin suffix
    #[arg(short, long)]
    index: String,

    /// Maximum number of results
    #[arg(long, allow_negative_numbers = true)]
    max_results: Option<i32>,

    /// Continuation from a previous page, as printed in an earlier descriptor
    #[arg(long, allow_hyphen_values = true)]
    continuation: Option<String>,

    /// Sort results for pagination
    #[arg(long)]
    pagination_sort: bool,

    /// Return index values together with the object keys
    #[arg(long)]
    key_and_index: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Int,
    Bin,
}

impl From<KindArg> for IndexKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Int => IndexKind::Integer,
            KindArg::Bin => IndexKind::Binary,
        }
    }
}

impl QueryArgs {
    fn location(&self) -> Location {
        let location = Location::new(self.bucket.as_str());
        match &self.bucket_type {
            Some(bucket_type) => location.with_bucket_type(bucket_type.as_str()),
            None => location,
        }
    }

    fn apply<B: IndexQueryBuilder>(&self, mut builder: B) -> B {
        if let Some(continuation) = &self.continuation {
            builder = builder.with_continuation(continuation.as_str());
        }
        if let Some(max_results) = self.max_results {
            builder = builder.with_max_results(max_results);
        }
        if self.pagination_sort {
            builder = builder.with_pagination_sort(true);
        }
        builder.with_key_and_index(self.key_and_index)
    }
}

fn with_term_filter<B: IndexQueryBuilder>(builder: B, term_filter: Option<String>) -> B {
    match term_filter {
        Some(filter) => builder.with_regex_term_filter(filter),
        None => builder,
    }
}

fn describe<B>(builder: B) -> Result<QueryDescriptor>
where
    B: IndexQueryBuilder,
    B::Query: Deref<Target = IndexQuery>,
{
    let query = builder.build()?;
    debug!(
        "built query on {} for index {}",
        query.location(),
        query.canonical_index_name()
    );
    Ok(query.create_core_query())
}

fn run(command: Commands) -> Result<QueryDescriptor> {
    match command {
        Commands::Int {
            common,
            key,
            start,
            end,
        } => {
            let builder = match (key, start, end) {
                (Some(key), _, _) => {
                    IntIndexQueryBuilder::new(common.location(), &common.index, key)
                }
                (None, Some(start), Some(end)) => {
                    IntIndexQueryBuilder::range(common.location(), &common.index, start, end)
                }
                _ => bail!("either --key or both --start and --end are required"),
            };
            describe(common.apply(builder))
        }
        Commands::Bin {
            common,
            key,
            start,
            end,
            term_filter,
        } => {
            let builder = match (key, start, end) {
                (Some(key), _, _) => {
                    BinIndexQueryBuilder::new(common.location(), &common.index, key)
                }
                (None, Some(start), Some(end)) => {
                    BinIndexQueryBuilder::range(common.location(), &common.index, start, end)
                }
                _ => bail!("either --key or both --start and --end are required"),
            };
            describe(with_term_filter(common.apply(builder), term_filter))
        }
        Commands::Raw {
            common,
            kind,
            key,
            start,
            end,
            term_filter,
            strict,
        } => {
            let keys = RawKeys {
                match_value: key.map(Into::into),
                range_start: start.map(Into::into),
                range_end: end.map(Into::into),
            };
            let builder = RawIndexQueryBuilder::from_parts(
                common.location(),
                &common.index,
                kind.into(),
                keys,
            )
            .with_strict_integer_keys(strict);
            describe(with_term_filter(common.apply(builder), term_filter))
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let descriptor = run(cli.command)?;
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &descriptor)?;
    writeln!(stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> Result<QueryDescriptor> {
        let cli = Cli::try_parse_from(args)?;
        run(cli.command)
    }

    #[test]
    fn test_int_match() -> Result<()> {
        let descriptor = run_args(&[
            "sidx",
            "int",
            "--bucket",
            "users",
            "--bucket-type",
            "accounts",
            "--index",
            "age",
            "--key",
            "-42",
            "--max-results",
            "10",
            "--pagination-sort",
        ])?;
        assert_eq!(descriptor.index_name(), "age_int");
        assert_eq!(descriptor.index_key().unwrap().to_string(), "-42");
        assert_eq!(descriptor.max_results(), Some(10));
        assert!(descriptor.is_pagination_sort());
        assert_eq!(
            descriptor.location(),
            &Location::new("users").with_bucket_type("accounts")
        );
        Ok(())
    }

    #[test]
    fn test_bin_range_with_filter() -> Result<()> {
        let descriptor = run_args(&[
            "sidx",
            "bin",
            "-b",
            "users",
            "-i",
            "email",
            "--start",
            "aaa",
            "--end",
            "zzz",
            "--term-filter",
            "^a",
        ])?;
        assert_eq!(descriptor.index_name(), "email_bin");
        assert_eq!(descriptor.range_start().unwrap().to_string(), "aaa");
        assert_eq!(descriptor.term_filter(), Some("^a"));
        Ok(())
    }

    #[test]
    fn test_continuation_with_leading_hyphen() -> Result<()> {
        let descriptor = run_args(&[
            "sidx",
            "bin",
            "-b",
            "users",
            "-i",
            "email",
            "--key",
            "a@b.c",
            "--continuation",
            "-g2gCYgAAA",
        ])?;
        assert_eq!(
            descriptor.continuation().map(ToString::to_string),
            Some("-g2gCYgAAA".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_missing_range_end() {
        let result = run_args(&["sidx", "int", "-b", "users", "-i", "age", "--start", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_raw_integer_filter_rejected() {
        let result = run_args(&[
            "sidx",
            "raw",
            "-b",
            "users",
            "-i",
            "age",
            "--kind",
            "int",
            "--key",
            "7",
            "--term-filter",
            "x",
        ]);
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<sidx_core::Error>(),
            Some(sidx_core::Error::IllegalConfiguration(_))
        ));
    }

    #[test]
    fn test_raw_strict() {
        let args = [
            "sidx", "raw", "-b", "users", "-i", "age", "--kind", "int", "--key", "seven",
        ];
        assert!(run_args(&args).is_ok());

        let mut strict = args.to_vec();
        strict.push("--strict");
        assert!(run_args(&strict).is_err());
    }
}
