use forge_core::{coff_args, Alias, AliasContext, AliasHandler, AliasParameter, AliasedCommand, Task, TransformError};

use super::{sa_description, TRUSTEDSEC};

pub const NAME: &str = "sa-wmi_query";

/// `\\<system>\<namespace>`
pub fn wmi_resource(system: &str, namespace: &str) -> String {
    format!("\\\\{system}\\{namespace}")
}

#[derive(Debug, Default)]
pub struct WmiQuery;

impl AliasHandler for WmiQuery {
    fn transform(&self, task: &Task, ctx: &AliasContext<'_>) -> Result<AliasedCommand, TransformError> {
        let system = task.args.string("system")?;
        let namespace = task.args.string("namespace")?;
        let query = task.args.string("query")?;
        let resource = wmi_resource(system, namespace);
        let file = ctx.object_file("wmi_query")?;
        Ok(AliasedCommand::execute_coff(file).with_arguments(coff_args![string: system,
                                                                        string: namespace,
                                                                        string: query,
                                                                        string: resource]))
    }
}

pub fn alias() -> Alias {
    Alias::new(NAME, WmiQuery).with_description(sa_description("wmi_query"))
                              .with_author(TRUSTEDSEC)
                              .with_parameters([AliasParameter::string("query").with_display_name("Query")
                                                                               .with_description("Query to run. This should be in WQL"),
                                                AliasParameter::string("system").with_display_name("System")
                                                                                .with_description("Remote system to connect to")
                                                                                .with_default("."),
                                                AliasParameter::string("namespace").with_display_name("Namespace")
                                                                                   .with_description("Namespace to connect to")
                                                                                   .with_default("root\\cimv2")])
}
