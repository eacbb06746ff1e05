use std::sync::Arc;

use tracing::{debug, trace};

use super::error::{BindError, BindErrorKind, FieldPath};
use super::typed::Bindable;
use crate::access::AccessStrategy;
use crate::describe::{DeclaredType, FieldDescriptor, PrimitiveKind, TypeDescriptor, TypeRegistry};
use crate::node::{Node, NodeData, NodeKind, Scalar};
use crate::policy::{RootTypeResolution, StrictnessPolicy};
use crate::value::{Instance, Value};

/// Binds generic trees to declared types under a [`StrictnessPolicy`].
///
/// Binding is all-or-nothing: the first violation, in field-declaration and
/// element order, aborts the call.
///
/// ## Example
///
/// ```
/// use docbind::{Binder, DeclaredType, FieldDecl, PrimitiveKind, StrictnessPolicy, TypeRef};
///
/// fn song() -> Vec<FieldDecl> {
///     vec![FieldDecl::new("name", DeclaredType::Primitive(PrimitiveKind::Str))]
/// }
/// const SONG: TypeRef = TypeRef::new("Song", song);
///
/// let node = docbind::parse::yaml::from_str(r#"["Stairway to Heaven"]"#)?;
/// let value = Binder::new(StrictnessPolicy::strict_immutable())
///     .bind_as(&node, &DeclaredType::Composite(SONG))?;
/// let song = value.as_instance().unwrap();
/// assert_eq!(song.get("name").and_then(|v| v.as_str()), Some("Stairway to Heaven"));
/// # Ok::<(), docbind::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Binder {
    registry: Arc<TypeRegistry>,
    policy: StrictnessPolicy,
    strategy: Arc<dyn AccessStrategy>,
}

impl Binder {
    /// Creates a binder with a private registry and the strategy the policy
    /// names.
    pub fn new(policy: StrictnessPolicy) -> Self {
        Self {
            registry: Arc::new(TypeRegistry::new()),
            policy,
            strategy: policy.access_strategy.strategy(),
        }
    }

    /// Shares `registry` (and its tag table and descriptor cache).
    pub fn with_registry(mut self, registry: Arc<TypeRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Replaces the policy-selected access strategy.
    pub fn with_access_strategy(self, strategy: impl AccessStrategy + 'static) -> Self {
        self.with_shared_strategy(Arc::new(strategy))
    }

    pub fn with_shared_strategy(mut self, strategy: Arc<dyn AccessStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn policy(&self) -> &StrictnessPolicy {
        &self.policy
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Binds `node` to `T`.
    ///
    /// The root type is `T` itself under [`RootTypeResolution::Explicit`];
    /// under [`RootTypeResolution::FromTag`] it is resolved from the node's tag
    /// and the result converted to `T`.
    pub fn bind<T: Bindable>(&self, node: &Node) -> Result<T, BindError> {
        let value = match self.policy.root_type_resolution {
            RootTypeResolution::Explicit => self.bind_as(node, &T::declared_type())?,
            RootTypeResolution::FromTag => self.bind_tagged(node)?,
        };
        T::from_value(value)
    }

    /// Binds `node` against an explicit declared type.
    pub fn bind_as(&self, node: &Node, ty: &DeclaredType) -> Result<Value, BindError> {
        let mut path = FieldPath::root();
        self.bind_value(node, ty, &mut path)
    }

    /// Binds `node` against the type named by its tag.
    ///
    /// An untagged sequence whose elements are all tagged binds element-wise
    /// into a list.
    pub fn bind_tagged(&self, node: &Node) -> Result<Value, BindError> {
        let mut path = FieldPath::root();
        if let Some(tag) = node.type_tag() {
            return self.bind_with_tag(node, tag, &mut path);
        }

        let items = match node.as_sequence() {
            Ok(items) if !items.is_empty() && items.iter().all(|i| i.type_tag().is_some()) => items,
            _ => return Err(BindError::at_root(BindErrorKind::UnknownType { tag: None })),
        };

        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            path.push_index(index);
            let tag = item.type_tag().unwrap_or_default();
            values.push(self.bind_with_tag(item, tag, &mut path)?);
            path.pop();
        }
        Ok(Value::List(values))
    }

    fn bind_with_tag(
        &self,
        node: &Node,
        tag: &str,
        path: &mut FieldPath,
    ) -> Result<Value, BindError> {
        let descriptor = self.registry.tag_lookup(tag, &self.policy).map_err(|e| {
            BindError::new(BindErrorKind::UnknownType { tag: Some(e.0) }, path.clone())
        })?;
        debug!(tag, type_name = descriptor.name(), %path, "resolved type from tag");
        self.bind_composite(node, &descriptor, path)
    }

    fn bind_value(
        &self,
        node: &Node,
        ty: &DeclaredType,
        path: &mut FieldPath,
    ) -> Result<Value, BindError> {
        if node.is_null() {
            return Err(BindError::conversion(ty.to_string(), "null", path));
        }

        match ty {
            DeclaredType::Primitive(kind) => {
                let scalar = node.as_scalar().map_err(|e| BindError::shape(e, path))?;
                convert_scalar(scalar, *kind)
                    .ok_or_else(|| BindError::conversion(kind.to_string(), scalar.describe(), path))
            }
            DeclaredType::List(element) => {
                let items = node.as_sequence().map_err(|e| BindError::shape(e, path))?;
                let mut values = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    path.push_index(index);
                    values.push(self.bind_value(item, element, path)?);
                    path.pop();
                }
                Ok(Value::List(values))
            }
            DeclaredType::Composite(ty) => {
                let descriptor = self.registry.describe(*ty, &self.policy);
                self.bind_composite(node, &descriptor, path)
            }
        }
    }

    fn bind_field(
        &self,
        node: &Node,
        field: &FieldDescriptor,
        path: &mut FieldPath,
    ) -> Result<Value, BindError> {
        if node.is_null() && field.is_nullable() {
            return Ok(Value::Null);
        }
        self.bind_value(node, field.declared_type(), path)
    }

    fn bind_composite(
        &self,
        node: &Node,
        descriptor: &Arc<TypeDescriptor>,
        path: &mut FieldPath,
    ) -> Result<Value, BindError> {
        if descriptor.is_default_constructible() {
            self.bind_keyed(node, descriptor, path)
        } else {
            self.bind_positional(node, descriptor, path)
        }
    }

    fn bind_keyed(
        &self,
        node: &Node,
        descriptor: &Arc<TypeDescriptor>,
        path: &mut FieldPath,
    ) -> Result<Value, BindError> {
        let entries = node.as_mapping().map_err(|e| BindError::shape(e, path))?;
        if !self.strategy.can_write(descriptor) {
            return Err(BindError::new(
                BindErrorKind::PositionalBindingRequired {
                    type_name: descriptor.name().to_string(),
                },
                path.clone(),
            ));
        }

        let mut instance = Instance::allocate(Arc::clone(descriptor));
        for field in descriptor.fields() {
            path.push_field(field.name());
            match entries.get(field.name()) {
                Some(child) => {
                    let value = self.bind_field(child, field, path)?;
                    self.strategy.write(&mut instance, field, value).map_err(|e| {
                        BindError::new(
                            BindErrorKind::AccessDenied {
                                strategy: e.strategy,
                                type_name: e.type_name,
                                field: e.field,
                            },
                            path.clone(),
                        )
                    })?;
                }
                None if field.has_default() => trace!(%path, "keeping declared default"),
                None if field.is_nullable() => {}
                None => {
                    return Err(BindError::new(
                        BindErrorKind::MissingField {
                            field: field.name().to_string(),
                        },
                        path.clone(),
                    ))
                }
            }
            path.pop();
        }

        for key in entries.keys().filter(|key| descriptor.field(key).is_none()) {
            trace!(
                type_name = descriptor.name(),
                key = key.as_str(),
                %path,
                "ignoring unknown key"
            );
        }

        Ok(Value::Object(instance))
    }

    fn bind_positional(
        &self,
        node: &Node,
        descriptor: &Arc<TypeDescriptor>,
        path: &mut FieldPath,
    ) -> Result<Value, BindError> {
        let items = match node.as_sequence() {
            Ok(items) => items,
            Err(e) if e.found == NodeKind::Mapping => {
                return Err(BindError::new(
                    BindErrorKind::PositionalBindingRequired {
                        type_name: descriptor.name().to_string(),
                    },
                    path.clone(),
                ))
            }
            Err(e) => return Err(BindError::shape(e, path)),
        };

        let params = descriptor.fields();
        // A trailing list parameter may be omitted entirely; it binds empty.
        let empty_tail = items.len() + 1 == params.len()
            && params.last().is_some_and(|p| p.declared_type().is_list());
        if items.len() != params.len() && !empty_tail {
            return Err(BindError::new(
                BindErrorKind::Arity {
                    type_name: descriptor.name().to_string(),
                    expected: params.len(),
                    found: items.len(),
                },
                path.clone(),
            ));
        }

        let mut args = Vec::with_capacity(params.len());
        for (index, (param, item)) in params.iter().zip(items).enumerate() {
            path.push_index(index);
            args.push(self.bind_field(item, param, path)?);
            path.pop();
        }
        if empty_tail {
            trace!(type_name = descriptor.name(), %path, "binding omitted trailing list as empty");
            args.push(Value::List(Vec::new()));
        }

        Ok(Value::Object(Instance::construct(Arc::clone(descriptor), args)))
    }
}

fn convert_scalar(scalar: &Scalar, kind: PrimitiveKind) -> Option<Value> {
    let value = match (kind, scalar) {
        (PrimitiveKind::Str, Scalar::Str(s)) => Value::Str(s.clone()),
        (PrimitiveKind::Str, Scalar::Int(i)) => Value::Str(i.to_string()),
        (PrimitiveKind::Str, Scalar::Float(f)) => Value::Str(f.to_string()),
        (PrimitiveKind::Str, Scalar::Bool(b)) => Value::Str(b.to_string()),
        (PrimitiveKind::Int, Scalar::Int(i)) => Value::Int(*i),
        (PrimitiveKind::Float, Scalar::Float(f)) => Value::Float(*f),
        (PrimitiveKind::Float, Scalar::Int(i)) => Value::Float(*i as f64),
        (PrimitiveKind::Bool, Scalar::Bool(b)) => Value::Bool(*b),
        _ => return None,
    };
    Some(value)
}

/// Echoes a tree as an untyped [`Value`], without consulting any registry
/// or policy. Tags are dropped.
pub fn reflect(node: &Node) -> Value {
    match node.data() {
        NodeData::Scalar(Scalar::Null) => Value::Null,
        NodeData::Scalar(Scalar::Bool(b)) => Value::Bool(*b),
        NodeData::Scalar(Scalar::Int(i)) => Value::Int(*i),
        NodeData::Scalar(Scalar::Float(f)) => Value::Float(*f),
        NodeData::Scalar(Scalar::Str(s)) => Value::Str(s.clone()),
        NodeData::Sequence(items) => Value::List(items.iter().map(reflect).collect()),
        NodeData::Mapping(entries) => Value::Map(
            entries
                .iter()
                .map(|(key, child)| (key.clone(), reflect(child)))
                .collect(),
        ),
    }
}
