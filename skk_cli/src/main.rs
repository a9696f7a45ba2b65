use std::{
    env,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use skk_core::{Dictionary, Jisyo, MergeMode};
use skk_dict::ReadOptions;

fn main() -> Result<()> {
    skk_cli::init_tracing();
    let dict_paths = parse_args();
    let mut jisyo = Jisyo::new();
    for path in &dict_paths {
        skk_dict::read_file(&mut jisyo, path, MergeMode::Add, &ReadOptions::default())
            .with_context(|| format!("failed to read dictionary: {}", path.display()))?;
    }
    repl(&jisyo, &dict_paths)
}

/// 可以多次指定 `--dict`，按顺序并集读入。
fn parse_args() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        if a == "--dict" {
            if let Some(p) = args.next() {
                paths.push(PathBuf::from(p));
            }
        }
        if a == "--help" || a == "-h" {
            print_help();
        }
    }
    if paths.is_empty() {
        paths.push(default_dict_path());
    }
    paths
}

fn print_help() -> ! {
    println!("用法：skk_cli [--dict <path>]...\n交互：输入见出し语回车查询候选；以 * 结尾列出补全（仅送りなし）；:q 退出");
    std::process::exit(0);
}

fn default_dict_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("asset")
        .join("SKK-JISYO.sample")
}

fn repl(dict: &impl Dictionary, dict_paths: &[PathBuf]) -> Result<()> {
    let mut out = io::stdout();
    let mut line = String::new();
    let names: Vec<String> = dict_paths.iter().map(|p| p.display().to_string()).collect();
    writeln!(out, "skk dictionary REPL | dict: {}", names.join(", "))?;
    writeln!(out, "输入见出し语后回车；`あ*` 列出补全。输入 :q 退出。")?;
    out.flush()?;

    loop {
        line.clear();
        print!("midashi>");
        out.flush()?;
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == ":q" || input == ":quit" || input == ":exit" {
            break;
        }

        if let Some(prefix) = input.strip_suffix('*') {
            let completion = dict.complete(prefix);
            if completion.is_empty() {
                writeln!(out, "(无补全)")?;
            }
            for (i, midashi) in completion.iter().enumerate() {
                writeln!(out, "{}. {midashi}", i + 1)?;
            }
            continue;
        }

        let Some(candidates) = dict.lookup(input) else {
            writeln!(out, "(未找到：{input})")?;
            continue;
        };
        for (i, c) in candidates.iter().enumerate() {
            let n = i + 1;
            if c.annotation.is_empty() {
                writeln!(out, "{n}. {}", c.text)?;
            } else {
                writeln!(out, "{n}. {}\t({})", c.text, c.annotation)?;
            }
        }
    }

    Ok(())
}
