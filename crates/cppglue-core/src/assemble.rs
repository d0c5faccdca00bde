//! Composes declarations into one module. This is the only stage aware of
//! references between entities.

use crate::{
    accessor,
    enumeration,
    error::GenerateError,
    mapper::{EntityKind, KnownEntities, MapError, TypeMapper},
    method::{self, Callable, Signature},
    module::{ClassType, Module},
};
use cppglue_schema::{
    node::{ClassDecl, EnumDecl, FunctionDecl, Schema},
    types::{EntityId, TypeRef},
    validate::naming::is_reserved,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Assemble classes and enums into a module.
pub fn assemble(classes: &[ClassDecl], enums: &[EnumDecl]) -> Result<Module, GenerateError> {
    let schema = Schema {
        classes: classes.to_vec(),
        enums: enums.to_vec(),
        ..Schema::default()
    };

    assemble_schema(&schema)
}

/// Assemble a whole declaration batch, free functions included.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(
        classes = schema.classes.len(),
        enums = schema.enums.len(),
        functions = schema.functions.len()
    )
)]
pub fn assemble_schema(schema: &Schema) -> Result<Module, GenerateError> {
    schema.validate()?;

    let known = known_entities(schema)?;
    check_module_names(schema)?;
    for class in &schema.classes {
        let members = class.fields.iter().map(|f| &f.name);
        check_unique(&class.name, members.chain(class.methods.iter().map(|m| &m.name)))?;
    }
    for decl in &schema.enums {
        check_unique(&decl.name, decl.enumerators.iter().map(|e| &e.name))?;
    }
    warn_host_keywords(schema);

    let mut assembler = Assembler {
        mapper: TypeMapper::new(&known),
    };

    let classes = schema
        .classes
        .iter()
        .map(|class| assembler.class(class))
        .collect::<Result<Vec<_>, _>>()?;
    let functions = schema
        .functions
        .iter()
        .map(|function| assembler.function(function))
        .collect::<Result<Vec<_>, _>>()?;

    check_layouts(schema)?;

    let enums = schema
        .enums
        .iter()
        .map(|decl| {
            let ty = enumeration::synthesize(decl);
            debug!(name = %decl.name, enumerators = decl.enumerators.len(), "enum synthesized");
            ty
        })
        .collect();

    Ok(Module::new(classes, enums, functions))
}

/// Names that are host keywords stay bound verbatim; the host can only
/// reach them through `getattr`.
fn warn_host_keywords(schema: &Schema) {
    let module = schema
        .classes
        .iter()
        .map(|c| ("module", c.name.as_str()))
        .chain(schema.enums.iter().map(|e| ("module", e.name.as_str())))
        .chain(schema.functions.iter().map(|f| ("module", f.name.as_str())));
    let members = schema.classes.iter().flat_map(|c| {
        c.fields
            .iter()
            .map(move |f| (c.name.as_str(), f.name.as_str()))
            .chain(c.methods.iter().map(move |m| (c.name.as_str(), m.name.as_str())))
    });
    let enumerators = schema.enums.iter().flat_map(|e| {
        e.enumerators
            .iter()
            .map(move |x| (e.name.as_str(), x.name.as_str()))
    });

    for (owner, name) in module.chain(members).chain(enumerators) {
        if is_reserved(name) {
            warn!(owner, name, "declared name is a host keyword");
        }
    }
}

///
/// Assembler
/// Maps signatures and synthesizes members, one declaration at a time.
///

struct Assembler<'a> {
    mapper: TypeMapper<'a>,
}

impl Assembler<'_> {
    fn class(&mut self, class: &ClassDecl) -> Result<ClassType, GenerateError> {
        let mut properties = Vec::with_capacity(class.fields.len());
        for (slot, field) in class.fields.iter().enumerate() {
            let strategy = self
                .mapper
                .map(field.ty)
                .map_err(|err| map_error(err, &class.name, &field.name))?;
            properties.push(accessor::synthesize(field, slot, strategy));
        }

        let mut methods = Vec::with_capacity(class.methods.len());
        for decl in &class.methods {
            let signature = self.signature(&decl.parameters, decl.return_type, &class.name, &decl.name)?;
            methods.push(method::synthesize(decl, &class.name, signature));
        }

        debug!(
            name = %class.name,
            properties = properties.len(),
            methods = methods.len(),
            "class synthesized"
        );

        Ok(ClassType::new(
            class.id,
            class.name.clone(),
            class.resolved_path().to_string(),
            properties,
            methods,
        ))
    }

    fn function(&mut self, function: &FunctionDecl) -> Result<Callable, GenerateError> {
        let signature = self.signature(
            &function.parameters,
            function.return_type,
            &function.name,
            "return",
        )?;
        debug!(name = %function.name, arity = signature.params.len(), "function synthesized");

        Ok(method::synthesize_function(function, signature))
    }

    fn signature(
        &mut self,
        params: &[TypeRef],
        returns: TypeRef,
        owner: &str,
        member: &str,
    ) -> Result<Signature, GenerateError> {
        let params = params
            .iter()
            .map(|ty| self.mapper.map(*ty))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| map_error(err, owner, member))?;
        let returns = self
            .mapper
            .map_return(returns)
            .map_err(|err| map_error(err, owner, member))?;

        Ok(Signature { params, returns })
    }
}

fn map_error(err: MapError, owner: &str, member: &str) -> GenerateError {
    match err {
        MapError::Unresolved(target) => GenerateError::UnresolvedEntity {
            owner: owner.to_string(),
            member: member.to_string(),
            target,
        },
        MapError::Void => GenerateError::VoidValue {
            owner: owner.to_string(),
            member: member.to_string(),
        },
    }
}

fn known_entities(schema: &Schema) -> Result<KnownEntities, GenerateError> {
    let mut known = KnownEntities::new();
    let entities = schema
        .classes
        .iter()
        .map(|c| (c.id, EntityKind::Class, &c.name))
        .chain(schema.enums.iter().map(|e| (e.id, EntityKind::Enum, &e.name)));

    for (id, kind, name) in entities {
        if let Err(holder) = known.insert(id, kind, name.as_str()) {
            return Err(GenerateError::DuplicateEntityId {
                id,
                first: holder.name.clone(),
                second: name.clone(),
            });
        }
    }

    Ok(known)
}

fn check_module_names(schema: &Schema) -> Result<(), GenerateError> {
    let names = schema
        .classes
        .iter()
        .map(|c| &c.name)
        .chain(schema.enums.iter().map(|e| &e.name))
        .chain(schema.functions.iter().map(|f| &f.name));

    check_unique("module", names)
}

fn check_unique<'a>(
    scope: &str,
    names: impl Iterator<Item = &'a String>,
) -> Result<(), GenerateError> {
    let mut seen = BTreeSet::new();

    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(GenerateError::DuplicateName {
                scope: scope.to_string(),
                name: name.clone(),
            });
        }
    }

    Ok(())
}

// A class reachable from itself through reference fields has no finite
// default layout.
fn check_layouts(schema: &Schema) -> Result<(), GenerateError> {
    let edges: BTreeMap<EntityId, Vec<(&str, EntityId)>> = schema
        .classes
        .iter()
        .map(|class| {
            let refs = class
                .fields
                .iter()
                .filter_map(|f| {
                    let id = f.ty.entity()?;
                    schema.get_class(id).map(|_| (f.name.as_str(), id))
                })
                .collect();
            (class.id, refs)
        })
        .collect();

    let mut done = BTreeSet::new();
    for class in &schema.classes {
        if done.contains(&class.id) {
            continue;
        }

        let mut path = vec![class.id];
        let mut fields = Vec::new();
        if let Some((target, cycle)) = walk(class.id, &edges, &mut path, &mut fields, &mut done) {
            let class = schema
                .get_class(target)
                .map_or_else(|| class.name.clone(), |c| c.name.clone());

            return Err(GenerateError::RecursiveLayout {
                path: format!("{class}.{}", cycle.join(".")),
                class,
            });
        }
    }

    Ok(())
}

// Depth-first; `path` holds the classes entered so far and `fields[i]` leads
// from `path[i]` to `path[i + 1]`.
fn walk<'a>(
    id: EntityId,
    edges: &BTreeMap<EntityId, Vec<(&'a str, EntityId)>>,
    path: &mut Vec<EntityId>,
    fields: &mut Vec<&'a str>,
    done: &mut BTreeSet<EntityId>,
) -> Option<(EntityId, Vec<&'a str>)> {
    for &(field, target) in edges.get(&id).into_iter().flatten() {
        if let Some(pos) = path.iter().position(|on_path| *on_path == target) {
            let mut cycle = fields[pos..].to_vec();
            cycle.push(field);
            return Some((target, cycle));
        }
        if done.contains(&target) {
            continue;
        }

        path.push(target);
        fields.push(field);
        let found = walk(target, edges, path, fields, done);
        fields.pop();
        path.pop();

        if found.is_some() {
            return found;
        }
    }

    done.insert(id);

    None
}

#[cfg(test)]
mod tests;
