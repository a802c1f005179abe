//! Tag expression compiler.
//!
//! Turns launch arguments such as
//! `--tags @a,@b ~@wip --tags @smoke --grep foo`
//! into the engine's boolean tag grammar:
//! `(@a or @b or not @wip) and (@smoke)`.

use tracing::trace;

const TAGS_FLAG: &str = "--tags";
const END_OF_OPTIONS: &str = "--";

/// Compiles CLI tag arguments into a tag expression.
///
/// An empty expression means "no filter".
#[derive(Debug, Default, Clone, Copy)]
pub struct TagExpressionCompiler;

impl TagExpressionCompiler {
    /// Create a compiler
    pub fn new() -> Self {
        Self
    }

    /// Compile `args` into a tag expression. Never fails; input without
    /// usable tags compiles to an empty string.
    pub fn compile<S: AsRef<str>>(&self, args: &[S]) -> String {
        let Some(start) = args.iter().position(|arg| is_tags_flag(arg.as_ref())) else {
            return String::new();
        };

        let mut groups: Vec<Vec<String>> = vec![Vec::new()];
        let mut collecting = true;

        for token in args[start + 1..].iter().map(|arg| arg.as_ref()) {
            if token == END_OF_OPTIONS {
                break;
            }
            if token.trim().is_empty() {
                continue;
            }

            if is_tags_flag(token) {
                groups.push(Vec::new());
                collecting = true;
            } else if token.starts_with("--") {
                // Another flag: its values are not tags.
                collecting = false;
            } else if collecting {
                if let Some(group) = groups.last_mut() {
                    group.extend(translate_token(token));
                }
            }
        }

        let expression = groups
            .into_iter()
            .filter(|group| !group.is_empty())
            .map(|group| format!("({})", group.join(" or ")))
            .collect::<Vec<_>>()
            .join(" and ");

        trace!(%expression, "Compiled tag expression");
        expression
    }
}

/// Compile launch arguments with the default compiler
pub fn compile_tag_expression<S: AsRef<str>>(args: &[S]) -> String {
    TagExpressionCompiler::new().compile(args)
}

fn is_tags_flag(token: &str) -> bool {
    token.eq_ignore_ascii_case(TAGS_FLAG)
}

/// One token may hold a comma separated list; each entry becomes an `or` term.
fn translate_token(token: &str) -> impl Iterator<Item = String> + '_ {
    token
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(|tag| match tag.strip_prefix('~') {
            Some(negated) => format!("not {}", negated.trim()),
            None => tag.to_string(),
        })
}
