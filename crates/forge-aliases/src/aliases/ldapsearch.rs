//! `sa-ldapsearch`: búsqueda LDAP contra el DC (o `hostname`).

use forge_core::{coff_args, Alias, AliasContext, AliasHandler, AliasParameter, AliasedCommand, Task, TransformError};
use serde_json::json;

use super::{sa_description, TRUSTEDSEC};

pub const NAME: &str = "sa-ldapsearch";

/// Scope LDAP (`LDAP_SCOPE_*` + 1, como lo espera el object file).
pub fn scope_code(scope: &str) -> Result<i64, TransformError> {
    match scope {
        "BASE" => Ok(1),
        "LEVEL" => Ok(2),
        "SUBTREE" => Ok(3),
        other => Err(TransformError::InvalidValue { name: "scope".into(),
                                                    value: other.to_string() }),
    }
}

#[derive(Debug, Default)]
pub struct Ldapsearch;

impl AliasHandler for Ldapsearch {
    fn transform(&self, task: &Task, ctx: &AliasContext<'_>) -> Result<AliasedCommand, TransformError> {
        let query = task.args.string("query")?;
        let attributes = match task.args.array("attributes")? {
            [] => "*".to_string(),
            list => list.join(","),
        };
        let count = task.args.integer("count")?;
        let scope = scope_code(task.args.choice("scope")?)?;
        let hostname = task.args.string("hostname")?;
        let dn = task.args.string("dn")?;
        let ldaps = task.args.boolean("ldaps")?;

        let file = ctx.object_file("ldapsearch")?;
        Ok(AliasedCommand::execute_coff(file).with_arguments(coff_args![string: query,
                                                                        string: attributes,
                                                                        int32: count,
                                                                        int32: scope,
                                                                        string: hostname,
                                                                        string: dn,
                                                                        int32: i64::from(ldaps)]))
    }
}

pub fn alias() -> Alias {
    Alias::new(NAME, Ldapsearch).with_description(sa_description("ldapsearch"))
                                .with_author(TRUSTEDSEC)
                                .with_parameters([AliasParameter::string("query").with_display_name("LDAP query to perform")
                                                                                 .with_description("LDAP query to perform"),
                                                  AliasParameter::array("attributes").with_description("the attributes to retrieve")
                                                                                     .with_default(json!([])),
                                                  AliasParameter::number("count").with_display_name("Maximum results to return")
                                                                                 .with_description("the result max size")
                                                                                 .with_default(0),
                                                  AliasParameter::choose_one("scope", ["BASE", "LEVEL", "SUBTREE"])
                                                      .with_display_name("Query scope")
                                                      .with_description("the scope to use")
                                                      .with_default("SUBTREE"),
                                                  AliasParameter::string("hostname")
                                                      .with_description("hostname or IP to perform the LDAP connection on (default: automatic DC resolution)")
                                                      .with_default(""),
                                                  AliasParameter::string("dn").with_display_name("the LDAP query base")
                                                                              .with_default(""),
                                                  AliasParameter::boolean("ldaps").with_description("use of ldaps")
                                                                                  .with_default(false)])
}
