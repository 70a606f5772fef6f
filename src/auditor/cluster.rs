//! Cluster reader: read-only listings translated into plain audit records.
//!
//! Wraps a `kube::Client` and maps provider objects (deployments, pods,
//! network policies, ingresses) into the engine's own record types so the
//! checks never touch API types directly. A failed listing never aborts
//! the audit: the affected collection stays empty and one `CheckError`
//! finding records what happened.
//!
//! # Prerequisites
//!
//! - Valid kubeconfig (uses default context or a specified context)
//! - RBAC permissions to list the four audited resource types

use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Container, Pod};
use k8s_openapi::api::networking::v1::{Ingress, NetworkPolicy};
use kube::{
    Client, Config,
    api::{Api, ListParams},
};
use log::{debug, warn};

use crate::auditor::types::{
    Category, ContainerRecord, DeploymentRecord, Finding, IngressRecord, NamespaceSnapshot,
    PodRecord, SecurityInfo, Severity,
};
use crate::error::Result;

/// Read-only view over one cluster connection.
///
/// The client is acquired once per audit run and passed explicitly, so
/// the engine stays testable with fakes built from plain records.
#[derive(Clone)]
pub struct ClusterReader {
    client: Client,
}

impl ClusterReader {
    /// Connect using the default kubeconfig, or a named context.
    ///
    /// This is the only fatal failure path of an audit run: without a
    /// cluster session there is nothing to audit.
    pub async fn connect(context: Option<&str>) -> Result<Self> {
        let config = match context {
            Some(ctx) => {
                let kubeconfig = kube::config::Kubeconfig::read()?;
                Config::from_custom_kubeconfig(
                    kubeconfig,
                    &kube::config::KubeConfigOptions {
                        context: Some(ctx.to_string()),
                        ..Default::default()
                    },
                )
                .await?
            }
            None => Config::infer().await?,
        };
        let client = Client::try_from(config)?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Read everything the checks need from one namespace.
    ///
    /// The four listings are independent and run concurrently. Each
    /// failure is converted into a `CheckError` finding so checks that
    /// rely on other resource types still run.
    pub async fn snapshot(&self, namespace: &str) -> NamespaceSnapshot {
        debug!("snapshotting namespace '{}'", namespace);
        let mut snapshot = NamespaceSnapshot::new(namespace);

        let (deployments, pods, policies, ingresses) = tokio::join!(
            self.list_deployments(namespace),
            self.list_pods(namespace),
            self.list_network_policies(namespace),
            self.list_ingresses(namespace),
        );

        match deployments {
            Ok(records) => snapshot.deployments = records,
            Err(e) => snapshot.errors.push(listing_error(namespace, "deployments", &e)),
        }
        match pods {
            Ok(records) => snapshot.pods = records,
            Err(e) => snapshot.errors.push(listing_error(namespace, "pods", &e)),
        }
        match policies {
            Ok(names) => snapshot.network_policies = names,
            Err(e) => {
                snapshot
                    .errors
                    .push(listing_error(namespace, "network policies", &e));
            }
        }
        match ingresses {
            Ok(records) => snapshot.ingresses = records,
            Err(e) => snapshot.errors.push(listing_error(namespace, "ingresses", &e)),
        }

        debug!(
            "namespace '{}': {} deployments, {} pods, {} network policies, {} ingresses, {} listing errors",
            namespace,
            snapshot.deployments.len(),
            snapshot.pods.len(),
            snapshot.network_policies.len(),
            snapshot.ingresses.len(),
            snapshot.errors.len(),
        );
        snapshot
    }

    /// List deployments in a namespace as audit records.
    pub async fn list_deployments(&self, namespace: &str) -> kube::Result<Vec<DeploymentRecord>> {
        let api: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        let list = api.list(&ListParams::default()).await?;
        Ok(list.items.into_iter().filter_map(deployment_to_record).collect())
    }

    /// List pods in a namespace as audit records.
    pub async fn list_pods(&self, namespace: &str) -> kube::Result<Vec<PodRecord>> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let list = api.list(&ListParams::default()).await?;
        Ok(list.items.into_iter().filter_map(pod_to_record).collect())
    }

    /// List NetworkPolicy names in a namespace.
    pub async fn list_network_policies(&self, namespace: &str) -> kube::Result<Vec<String>> {
        let api: Api<NetworkPolicy> = Api::namespaced(self.client.clone(), namespace);
        let list = api.list(&ListParams::default()).await?;
        Ok(list.items.into_iter().filter_map(|np| np.metadata.name).collect())
    }

    /// List ingresses in a namespace as audit records.
    pub async fn list_ingresses(&self, namespace: &str) -> kube::Result<Vec<IngressRecord>> {
        let api: Api<Ingress> = Api::namespaced(self.client.clone(), namespace);
        let list = api.list(&ListParams::default()).await?;
        Ok(list.items.into_iter().filter_map(ingress_to_record).collect())
    }
}

fn listing_error(namespace: &str, resource: &str, err: &kube::Error) -> Finding {
    warn!("could not list {} in namespace '{}': {}", resource, namespace, err);
    Finding::new(
        namespace,
        namespace,
        Severity::Error,
        Category::CheckError,
        format!("could not list {} in namespace '{}': {}", resource, namespace, err),
    )
}

/// Convert a K8s deployment to an audit record. Nameless objects are
/// skipped; the API does not produce them in practice.
fn deployment_to_record(deployment: Deployment) -> Option<DeploymentRecord> {
    let name = deployment.metadata.name?;
    let created_at = deployment.metadata.creation_timestamp.map(|t| t.0);
    let containers: Vec<ContainerRecord> = deployment
        .spec
        .and_then(|spec| spec.template.spec)
        .map(|pod_spec| pod_spec.containers.iter().map(container_to_record).collect())
        .unwrap_or_default();
    let images = containers.iter().map(|c| c.image.clone()).collect();

    Some(DeploymentRecord {
        name,
        images,
        created_at,
        containers,
    })
}

fn pod_to_record(pod: Pod) -> Option<PodRecord> {
    let name = pod.metadata.name?;
    let containers = pod
        .spec
        .map(|spec| spec.containers.iter().map(container_to_record).collect())
        .unwrap_or_default();
    Some(PodRecord { name, containers })
}

fn ingress_to_record(ingress: Ingress) -> Option<IngressRecord> {
    let name = ingress.metadata.name?;
    let has_tls = ingress
        .spec
        .and_then(|spec| spec.tls)
        .map(|tls| !tls.is_empty())
        .unwrap_or(false);
    Some(IngressRecord { name, has_tls })
}

fn container_to_record(container: &Container) -> ContainerRecord {
    let security_context = container.security_context.as_ref().map(|sc| SecurityInfo {
        privileged: sc.privileged,
        run_as_non_root: sc.run_as_non_root,
    });
    let limits_defined = container
        .resources
        .as_ref()
        .and_then(|r| r.limits.as_ref())
        .map(|limits| !limits.is_empty())
        .unwrap_or(false);

    ContainerRecord {
        name: container.name.clone(),
        image: container.image.clone().unwrap_or_default(),
        security_context,
        limits_defined,
    }
}
