//! The `lex` and `parse` commands: dump front-end output for inspection.

use cairn_diagnostic::span_utils::LineIndex;
use cairn_diagnostic::Diagnostic;
use cairn_ir::{Module, Param, StringInterner, Type};

use super::{read_file, render_diagnostics, write_stderr};
use crate::config::OutputFormat;

/// Print every token with its `line:col` position.
pub fn lex_file(path: &str) -> bool {
    let source = read_file(path);
    match cairn_lexer::lex(&source) {
        Ok(tokens) => {
            let index = LineIndex::build(&source);
            for spanned in &tokens {
                let (line, col) = index.line_col(spanned.span.start);
                println!("{line}:{col}\t{:?}", spanned.token);
            }
            println!("{} tokens", tokens.len());
            true
        }
        Err(errors) => {
            let diagnostics: Vec<Diagnostic> =
                errors.iter().map(|e| e.to_diagnostic(&source)).collect();
            write_stderr(&render_diagnostics(
                &diagnostics,
                path,
                &source,
                OutputFormat::Human,
            ));
            false
        }
    }
}

/// Print the definitions of a file, parse errors included.
pub fn parse_file(path: &str) -> bool {
    let source = read_file(path);
    let interner = StringInterner::new();
    let output = match cairn_parse::parse_source(&source, &interner) {
        Ok(output) => output,
        Err(diagnostics) => {
            write_stderr(&render_diagnostics(
                &diagnostics,
                path,
                &source,
                OutputFormat::Human,
            ));
            return false;
        }
    };
    print!("{}", describe_module(&output.module, &interner));
    if output.has_errors() {
        write_stderr(&render_diagnostics(
            &output.diagnostics(),
            path,
            &source,
            OutputFormat::Human,
        ));
        return false;
    }
    true
}

/// One line per definition, docs as `#` lines above it.
pub fn describe_module(module: &Module, interner: &StringInterner) -> String {
    let mut out = String::new();
    for ext in &module.externs {
        write_doc(&mut out, ext.doc.as_deref());
        out.push_str(&format!(
            "extern fn {}{}\n",
            interner.lookup(ext.name),
            signature(&ext.params, ext.ret, interner)
        ));
    }
    for func in &module.functions {
        write_doc(&mut out, func.doc.as_deref());
        let count = func.body.stmts.len();
        out.push_str(&format!(
            "fn {}{} ({count} statement{})\n",
            interner.lookup(func.name),
            signature(&func.params, func.ret, interner),
            if count == 1 { "" } else { "s" }
        ));
    }
    out
}

fn write_doc(out: &mut String, doc: Option<&str>) {
    for line in doc.into_iter().flat_map(str::lines) {
        out.push_str(&format!("# {line}\n"));
    }
}

fn signature(params: &[Param], ret: Type, interner: &StringInterner) -> String {
    let params = params
        .iter()
        .map(|p| format!("{}: {}", interner.lookup(p.name), p.ty))
        .collect::<Vec<_>>()
        .join(", ");
    if ret == Type::Unit {
        format!("({params})")
    } else {
        format!("({params}) -> {ret}")
    }
}
