use std::{
    fs::File,
    io::{self, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use skk_core::{Jisyo, MergeMode};
use skk_dict::{ReadOptions, WriteOptions};
use skk_cli::expr::{self, ExprArgs};

fn main() -> ExitCode {
    skk_cli::init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error : {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = expr::parse_args(std::env::args().skip(1))
        .inspect_err(|_| eprintln!("{}", expr::USAGE))?;
    if args.help {
        eprintln!("{}", expr::USAGE);
        return Ok(());
    }

    let jisyo = evaluate(&args)?;

    let mut write_options = WriteOptions::default();
    if let Some(e) = args.output_encoding {
        write_options = write_options.encoding(e);
    }
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output file: {}", path.display()))?;
            write_to(&jisyo, file, &write_options)
        }
        None => write_to(&jisyo, io::stdout().lock(), &write_options),
    }
}

fn evaluate(args: &ExprArgs) -> Result<Jisyo> {
    let mut jisyo = match &args.delimiter {
        Some(d) => Jisyo::new().delimiter(d.as_str()),
        None => Jisyo::new(),
    };
    let read_options = ReadOptions {
        encoding: args.input_encoding,
    };

    // 没有操作数：从 stdin 读入
    if args.operands.is_empty() {
        skk_dict::read(&mut jisyo, io::stdin().lock(), MergeMode::Add, &read_options)
            .context("failed to read dictionary")?;
        return Ok(jisyo);
    }

    for step in expr::plan(&args.operands) {
        skk_dict::read_file(&mut jisyo, &step.path, step.mode, &read_options)
            .context("failed to read dictionary")?;
    }
    Ok(jisyo)
}

fn write_to(jisyo: &Jisyo, mut out: impl Write, options: &WriteOptions) -> Result<()> {
    skk_dict::write(jisyo, &mut out, options).context("failed to write dictionary")?;
    Ok(())
}
