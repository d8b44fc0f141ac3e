//! `sa-nslookup`: consulta DNS desde el host comprometido.

use forge_core::{coff_args, Alias, AliasContext, AliasHandler, AliasParameter, AliasedCommand, Task, TransformError};

use super::{sa_description, TRUSTEDSEC};

pub const NAME: &str = "sa-nslookup";

/// Tipos de registro DNS (`DNS_TYPE_*` de windns.h), en el orden en que se
/// ofrecen al operador.
pub const RECORD_TYPES: &[(&str, i64)] = &[("A", 0x1),
                                           ("NS", 0x2),
                                           ("MD", 0x3),
                                           ("MF", 0x4),
                                           ("CNAME", 0x5),
                                           ("SOA", 0x6),
                                           ("MB", 0x7),
                                           ("MG", 0x8),
                                           ("MR", 0x9),
                                           ("WKS", 0xb),
                                           ("PTR", 0xc),
                                           ("HINFO", 0xd),
                                           ("MINFO", 0xe),
                                           ("MX", 0xf),
                                           ("TXT", 0x10),
                                           ("RP", 0x11),
                                           ("AFSDB", 0x12),
                                           ("X25", 0x13),
                                           ("ISDN", 0x14),
                                           ("RT", 0x15),
                                           ("AAAA", 0x1c),
                                           ("SRV", 0x21),
                                           ("WINSR", 0xff02),
                                           ("KEY", 0x19),
                                           ("ANY", 0xff)];

pub fn record_type(name: &str) -> Option<i64> {
    RECORD_TYPES.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
}

#[derive(Debug, Default)]
pub struct Nslookup;

impl AliasHandler for Nslookup {
    fn transform(&self, task: &Task, ctx: &AliasContext<'_>) -> Result<AliasedCommand, TransformError> {
        let domain = task.args.string("domain")?;
        let server = task.args.string("server")?;
        let kind = task.args.choice("type")?;
        let record = record_type(kind).ok_or_else(|| TransformError::InvalidValue { name: "type".into(),
                                                                                    value: kind.to_string() })?;
        let file = ctx.object_file("nslookup")?;
        Ok(AliasedCommand::execute_coff(file).with_arguments(coff_args![string: domain,
                                                                        string: server,
                                                                        int16: record]))
    }
}

pub fn alias() -> Alias {
    Alias::new(NAME, Nslookup).with_description(sa_description("nslookup"))
                              .with_author(TRUSTEDSEC)
                              .with_parameters([AliasParameter::string("domain").with_display_name("Domain name")
                                                                                .with_description("Domain name to look up"),
                                                AliasParameter::string("server").with_display_name("DNS server")
                                                                                .with_description("DNS server to query")
                                                                                .with_default(""),
                                                AliasParameter::choose_one("type",
                                                                           RECORD_TYPES.iter().map(|(n, _)| *n))
                                                    .with_display_name("Record type")
                                                    .with_description("DNS record type to look up")
                                                    .with_default("A")])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_map() {
        assert_eq!(record_type("A"), Some(1));
        assert_eq!(record_type("AAAA"), Some(0x1c));
        assert_eq!(record_type("WINSR"), Some(0xff02));
        assert_eq!(record_type("a"), None);
        assert_eq!(alias().parameter("type").unwrap().choices.len(), RECORD_TYPES.len());
    }
}
