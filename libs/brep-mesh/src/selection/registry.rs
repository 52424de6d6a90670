//! # Selection Registry
//!
//! Named selections owned by the mesh. Ids are caller-chosen and 0 is never
//! a valid id. Operators read their input from a source id and route their
//! result to an optional result id, see [`Mesh::output_selection`].

use std::collections::BTreeSet;

use glam::DVec3;

use crate::error::{MeshError, MeshResult};
use crate::mesh::{EdgeId, FacetId, Mesh, VertexId};

use super::{ConvertMode, Domain, Element, Selection};

impl Mesh {
    /// Registers an empty selection.
    pub fn new_selection(&mut self, id: u32, domain: Domain) -> MeshResult<()> {
        if id == 0 {
            return Err(MeshError::invalid_parameter("new_selection", "selection id 0 is reserved"));
        }
        if self.selections.contains_key(&id) {
            return Err(MeshError::SelectionExists(id));
        }
        self.selections.insert(id, Selection::new(domain));
        Ok(())
    }

    /// Unregisters a selection, handing it back.
    pub fn delete_selection(&mut self, id: u32) -> MeshResult<Selection> {
        self.selections.remove(&id).ok_or(MeshError::UnknownSelection(id))
    }

    /// Returns a registered selection.
    pub fn selection(&self, id: u32) -> Option<&Selection> {
        self.selections.get(&id)
    }

    /// Registered selection ids in ascending order.
    pub fn selection_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.selections.keys().copied()
    }

    /// Deselects everything in a selection.
    pub fn empty_selection(&mut self, id: u32) -> MeshResult<()> {
        self.selection_mut(id)?.clear();
        Ok(())
    }

    /// Selects the element called `name` in the selection's domain.
    pub fn add_single(&mut self, id: u32, name: u32) -> MeshResult<()> {
        let domain = self.selection_domain(id)?;
        match domain {
            Domain::Vertex => self.edit_single::<VertexId>(id, name, true),
            Domain::Edge => self.edit_single::<EdgeId>(id, name, true),
            Domain::Facet => self.edit_single::<FacetId>(id, name, true),
        }
    }

    /// Deselects the element called `name` in the selection's domain.
    pub fn sub_single(&mut self, id: u32, name: u32) -> MeshResult<()> {
        let domain = self.selection_domain(id)?;
        match domain {
            Domain::Vertex => self.edit_single::<VertexId>(id, name, false),
            Domain::Edge => self.edit_single::<EdgeId>(id, name, false),
            Domain::Facet => self.edit_single::<FacetId>(id, name, false),
        }
    }

    fn edit_single<E: Element>(&mut self, id: u32, name: u32, add: bool) -> MeshResult<()> {
        let element = E::by_name(self, name).ok_or(MeshError::UnknownElement {
            domain: E::DOMAIN,
            name,
        })?;
        let sel = self.selection_mut(id)?;
        if add {
            sel.insert(element);
        } else {
            sel.remove(element);
        }
        Ok(())
    }

    /// Adds `src` to `dst`, converting it to the domain of `dst` (MIN) first.
    pub fn add_selection(&mut self, dst: u32, src: u32) -> MeshResult<()> {
        let other = self.converted_for(dst, src)?;
        self.selection_mut(dst)?.union_with(&other);
        Ok(())
    }

    /// Removes `src` from `dst`, converting it to the domain of `dst` (MIN)
    /// first.
    pub fn sub_selection(&mut self, dst: u32, src: u32) -> MeshResult<()> {
        let other = self.converted_for(dst, src)?;
        self.selection_mut(dst)?.subtract(&other);
        Ok(())
    }

    fn converted_for(&self, dst: u32, src: u32) -> MeshResult<Selection> {
        let domain = self.selection_domain(dst)?;
        let source = self.selection(src).ok_or(MeshError::UnknownSelection(src))?;
        Ok(if source.domain() == domain {
            source.clone()
        } else {
            self.convert(source, domain, ConvertMode::Min)
        })
    }

    /// Complements a selection against every live element of its domain.
    pub fn toggle_selection(&mut self, id: u32) -> MeshResult<()> {
        let domain = self.selection_domain(id)?;
        let all = match domain {
            Domain::Vertex => Selection::Vertices(VertexId::all(self)),
            Domain::Edge => Selection::Edges(EdgeId::all(self)),
            Domain::Facet => Selection::Facets(FacetId::all(self)),
        };
        let sel = self.selection_mut(id)?;
        let mut toggled = all;
        toggled.subtract(sel);
        *sel = toggled;
        Ok(())
    }

    /// Converts selection `source` to `domain` and routes the outcome.
    pub fn convert_selection(
        &mut self,
        source: u32,
        domain: Domain,
        mode: ConvertMode,
        result: Option<u32>,
    ) -> MeshResult<()> {
        let sel = self.selection(source).ok_or(MeshError::UnknownSelection(source))?;
        let converted = self.convert(sel, domain, mode);
        self.output_selection(source, result, converted)
    }

    /// Dilates selection `source` by `level` rings and routes the outcome.
    pub fn propagate_selection(&mut self, source: u32, level: u32, result: Option<u32>) -> MeshResult<()> {
        let sel = self.selection(source).ok_or(MeshError::UnknownSelection(source))?;
        let grown = self.propagate(sel, level);
        self.output_selection(source, result, grown)
    }

    /// Returns true if `element` belongs to selection `id`.
    pub fn is_selected<E: Element>(&self, id: u32, element: E) -> bool {
        self.selections.get(&id).is_some_and(|sel| sel.contains(element))
    }

    /// Mean position of the vertices covered by a selection.
    pub fn selection_center(&self, id: u32) -> MeshResult<DVec3> {
        let sel = self.selection(id).ok_or(MeshError::UnknownSelection(id))?;
        self.center(sel)
            .ok_or(MeshError::EmptySelection { operation: "selection_center" })
    }

    // =========================================================================
    // OPERATOR PLUMBING
    // =========================================================================

    fn selection_mut(&mut self, id: u32) -> MeshResult<&mut Selection> {
        self.selections.get_mut(&id).ok_or(MeshError::UnknownSelection(id))
    }

    fn selection_domain(&self, id: u32) -> MeshResult<Domain> {
        self.selection(id)
            .map(Selection::domain)
            .ok_or(MeshError::UnknownSelection(id))
    }

    /// Live elements of selection `id`, which must hold `E`.
    pub(crate) fn selection_required<E: Element>(&self, id: u32, operation: &'static str) -> MeshResult<BTreeSet<E>> {
        let sel = self.selection(id).ok_or(MeshError::UnknownSelection(id))?;
        let set = E::set(sel).ok_or_else(|| MeshError::wrong_domain(operation, E::DOMAIN, sel.domain()))?;
        Ok(set.iter().copied().filter(|&e| e.is_alive(self)).collect())
    }

    /// Snapshot of selection `id`, any domain.
    pub(crate) fn selection_snapshot(&self, id: u32) -> MeshResult<Selection> {
        self.selection(id).cloned().ok_or(MeshError::UnknownSelection(id))
    }

    /// Checks that `result` names a usable result selection. Operators call
    /// it before touching the mesh.
    pub(crate) fn result_required(&self, result: Option<u32>, operation: &'static str) -> MeshResult<()> {
        match result {
            Some(0) => Err(MeshError::invalid_parameter(operation, "selection id 0 is reserved")),
            _ => Ok(()),
        }
    }

    /// Routes an operator result: `None` discards it, the source id replaces
    /// the source, any other id is created or overwritten.
    pub(crate) fn output_selection(&mut self, source: u32, result: Option<u32>, sel: Selection) -> MeshResult<()> {
        self.result_required(result, "output_selection")?;
        let Some(target) = result else {
            return Ok(());
        };
        if target != source {
            log::debug!("routing {} {} elements to selection {}", sel.len(), sel.domain(), target);
        }
        self.selections.insert(target, sel);
        Ok(())
    }
}
