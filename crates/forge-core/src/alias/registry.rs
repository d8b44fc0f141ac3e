use std::collections::HashSet;

use indexmap::IndexMap;
use log::debug;

use super::{Alias, AliasHandler, CommandSpec};
use crate::errors::RegistrationError;
use crate::schema::AliasParameter;

/// Acumula aliases durante el arranque. Se congela con `build`.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    aliases: IndexMap<String, Alias>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra un alias completo. Un nombre repetido falla y conserva el
    /// primero.
    pub fn register(&mut self, alias: Alias) -> Result<(), RegistrationError> {
        if alias.command_name.is_empty() {
            return Err(RegistrationError::EmptyName);
        }
        if self.aliases.contains_key(&alias.command_name) {
            return Err(RegistrationError::DuplicateName(alias.command_name));
        }
        let mut seen = HashSet::new();
        for p in &alias.parameters {
            if !seen.insert(p.name.as_str()) {
                return Err(RegistrationError::DuplicateParameter { alias: alias.command_name.clone(),
                                                                   name: p.name.clone() });
            }
            p.check().map_err(|detail| RegistrationError::InvalidParameter { alias: alias.command_name.clone(),
                                                                             name: p.name.clone(),
                                                                             detail })?;
        }
        debug!("alias registered name={} params={}", alias.command_name, alias.parameters.len());
        self.aliases.insert(alias.command_name.clone(), alias);
        Ok(())
    }

    pub fn register_alias<H>(&mut self,
                             command_name: &str,
                             handler: H,
                             description: &str,
                             author: &str,
                             parameters: Vec<AliasParameter>)
                             -> Result<(), RegistrationError>
        where H: AliasHandler + 'static
    {
        self.register(Alias::new(command_name, handler).with_description(description)
                                                       .with_author(author)
                                                       .with_parameters(parameters))
    }

    pub fn contains(&self, command_name: &str) -> bool {
        self.aliases.contains_key(command_name)
    }

    pub fn build(self) -> AliasRegistry {
        AliasRegistry { aliases: self.aliases }
    }
}

/// Registry congelado, de sólo lectura. Se comparte vía `Arc`.
#[derive(Debug, Default)]
pub struct AliasRegistry {
    aliases: IndexMap<String, Alias>,
}

impl AliasRegistry {
    pub fn get(&self, command_name: &str) -> Option<&Alias> {
        self.aliases.get(command_name)
    }

    pub fn contains(&self, command_name: &str) -> bool {
        self.aliases.contains_key(command_name)
    }

    /// Nombres en orden de registro.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.aliases.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alias> {
        self.aliases.values()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    pub fn command_specs(&self) -> Vec<CommandSpec> {
        self.aliases.values().map(Alias::command_spec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::AliasContext;
    use crate::errors::TransformError;
    use crate::model::{AliasedCommand, Task};

    fn first(_: &Task, _: &AliasContext<'_>) -> Result<AliasedCommand, TransformError> {
        Ok(AliasedCommand::builtin("first"))
    }

    fn second(_: &Task, _: &AliasContext<'_>) -> Result<AliasedCommand, TransformError> {
        Ok(AliasedCommand::builtin("second"))
    }

    #[test]
    fn duplicate_name_keeps_first() {
        let mut b = RegistryBuilder::new();
        b.register_alias("sa-whoami", first, "one", "a", vec![]).unwrap();
        let err = b.register_alias("sa-whoami", second, "two", "b", vec![]).unwrap_err();
        assert_eq!(err, RegistrationError::DuplicateName("sa-whoami".into()));
        let reg = b.build();
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("sa-whoami").unwrap().description, "one");
    }

    #[test]
    fn rejects_bad_declarations() {
        let mut b = RegistryBuilder::new();
        assert_eq!(b.register_alias("", first, "", "", vec![]), Err(RegistrationError::EmptyName));
        let err = b.register_alias("x",
                                   first,
                                   "",
                                   "",
                                   vec![AliasParameter::string("q"), AliasParameter::number("q")])
                   .unwrap_err();
        assert_eq!(err, RegistrationError::DuplicateParameter { alias: "x".into(), name: "q".into() });
        let err = b.register_alias("y",
                                   first,
                                   "",
                                   "",
                                   vec![AliasParameter::choose_one("scope", ["A"]).with_default("B")])
                   .unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidParameter { ref name, .. } if name == "scope"));
        assert!(!b.contains("x") && !b.contains("y"));
    }

    #[test]
    fn names_keep_registration_order() {
        let mut b = RegistryBuilder::new();
        b.register_alias("b", first, "", "", vec![]).unwrap();
        b.register_alias("a", second, "", "", vec![]).unwrap();
        let reg = b.build();
        assert_eq!(reg.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(reg.command_specs().len(), 2);
    }
}
