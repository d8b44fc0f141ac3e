pub mod builtin_whoami;
pub mod ldapsearch;
pub mod nslookup;
pub mod whoami;
pub mod wmi_query;

pub(crate) const TRUSTEDSEC: &str = "TrustedSec";

pub(crate) fn sa_description(bof: &str) -> String {
    format!("Runs TrustedSec's {bof} Situational Awareness BOF")
}
