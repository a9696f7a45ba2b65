//! `skkdic-expr` 的参数解析与求值计划。
//!
//! `skkdic-expr [-i enc] [-e enc] [-d delim] [-o output] jisyo1 [[+-^] jisyo2]...`
//!
//! 操作数从左到右处理，当前模式初始为 Add：
//! - `+` / `-` / `^` 单独出现：切换当前模式
//! - `+path`：以 Add 读入
//! - `-path` / `^path`：以 Sub / And 读入，随后模式回到 Add
//! - 其余：以当前模式读入
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use skk_core::MergeMode;
use skk_dict::Encoding;
use tracing::warn;

pub const USAGE: &str =
    "Usage: skkdic-expr [-i input_encoding] [-e output_encoding] [-d delimiter] [-o output] jisyo1 [[+-^] jisyo2]...";

/// 命令行参数。
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExprArgs {
    /// 注释分隔符（`-d`）
    pub delimiter: Option<String>,
    /// 输出文件（`-o`）；None 表示 stdout
    pub output: Option<PathBuf>,
    /// 输入编码（`-i`）；None 表示按 coding 声明自动判断
    pub input_encoding: Option<Encoding>,
    /// 输出编码（`-e`）
    pub output_encoding: Option<Encoding>,
    /// 词典表达式
    pub operands: Vec<String>,
    pub help: bool,
}

/// 解析参数。选项只允许出现在第一个操作数之前（`--` 结束选项）。
///
/// 约定：
/// - `-o out`、`-o=out`、`--o out`、`--o=out` 等价
/// - 未定义的选项是错误
pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<ExprArgs> {
    let mut out = ExprArgs::default();
    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        if a == "--" {
            out.operands.extend(args);
            break;
        }
        let Some(flag) = flag_name(&a) else {
            out.operands.push(a);
            out.operands.extend(args);
            break;
        };
        let (name, inline) = match flag.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (flag, None),
        };
        match name {
            "d" => out.delimiter = Some(flag_value(inline, &mut args, &a)?),
            "o" => out.output = Some(PathBuf::from(flag_value(inline, &mut args, &a)?)),
            "i" => out.input_encoding = parse_encoding(&flag_value(inline, &mut args, &a)?),
            "e" => out.output_encoding = parse_encoding(&flag_value(inline, &mut args, &a)?),
            "h" | "help" if inline.is_none() => out.help = true,
            _ => bail!("flag provided but not defined: {a}"),
        }
    }
    Ok(out)
}

/// `-x` / `--x` 去掉前缀后的名字；单独的 `-` 是操作符，不是选项。
fn flag_name(arg: &str) -> Option<&str> {
    let name = arg.strip_prefix('-')?;
    let name = name.strip_prefix('-').unwrap_or(name);
    (!name.is_empty()).then_some(name)
}

fn flag_value(
    inline: Option<String>,
    args: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<String> {
    match inline {
        Some(v) => Ok(v),
        None => args
            .next()
            .with_context(|| format!("flag needs an argument: {flag}")),
    }
}

/// 不认识的编码名被忽略（回退到默认行为）。
fn parse_encoding(name: &str) -> Option<Encoding> {
    match name.parse() {
        Ok(e) => Some(e),
        Err(e) => {
            warn!("{e}; ignored");
            None
        }
    }
}

/// 求值计划中的一步：以某个模式读入一个词典。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub path: PathBuf,
    pub mode: MergeMode,
}

/// 把操作数序列展开为读入步骤。
pub fn plan(operands: &[String]) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut mode = MergeMode::Add;
    for operand in operands {
        let mut chars = operand.chars();
        let Some(op) = chars.next().and_then(MergeMode::from_operator) else {
            steps.push(Step {
                path: PathBuf::from(operand),
                mode,
            });
            continue;
        };
        mode = op;
        let rest = chars.as_str();
        if rest.is_empty() {
            continue;
        }
        steps.push(Step {
            path: PathBuf::from(rest),
            mode,
        });
        mode = MergeMode::Add;
    }
    steps
}
