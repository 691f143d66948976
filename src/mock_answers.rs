//! Canonical demo answers and the generic template used by the mock backend.

use crate::data_models::{Category, Difficulty, StructuredAnswer};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Keyword-pair lookup over the fixed table, generic template otherwise.
/// Deterministic and infallible.
pub fn mock_answer(query: &str, category: Category) -> StructuredAnswer {
    let q = query.to_lowercase();
    if q.contains("teleport") && q.contains("unity") {
        unity_teleport()
    } else if q.contains("multiplayer") && q.contains("unreal") {
        unreal_multiplayer()
    } else if q.contains("shader") && q.contains("occlusion") {
        shader_occlusion()
    } else {
        generic(query, category)
    }
}

pub fn unity_teleport() -> StructuredAnswer {
    StructuredAnswer {
        subtasks: strings(&[
            "Install XR Interaction Toolkit package via Package Manager",
            "Create XR Origin (VR) prefab in your scene",
            "Add Teleportation Provider component to XR Origin",
            "Create teleportation areas using Teleportation Area prefab",
            "Configure Input Actions for teleportation",
        ]),
        code_snippet: r#"// TeleportationManager.cs
using UnityEngine;
using UnityEngine.XR.Interaction.Toolkit;

public class TeleportationManager : MonoBehaviour
{
    [SerializeField] private TeleportationProvider teleportationProvider;
    [SerializeField] private LineRenderer lineRenderer;

    void Start()
    {
        if (teleportationProvider == null)
            teleportationProvider = FindObjectOfType<TeleportationProvider>();
    }

    public void RequestTeleport(TeleportRequest request)
    {
        teleportationProvider.QueueTeleportRequest(request);
    }
}"#
        .to_string(),
        best_practices: strings(&[
            "Always validate teleport destinations to avoid placing users inside objects",
            "Use smooth locomotion as a fallback for users with motion sensitivity",
            "Implement audio/visual feedback for successful teleportations",
            "Consider using fade transitions to reduce motion sickness",
        ]),
        difficulty: Difficulty::Medium,
        documentation_links: strings(&[
            "https://docs.unity3d.com/Packages/com.unity.xr.interaction.toolkit@2.5/manual/locomotion.html",
            "https://docs.unity3d.com/Packages/com.unity.xr.interaction.toolkit@2.5/manual/teleportation-provider.html",
        ]),
        estimated_time: "45 minutes".to_string(),
    }
}

pub fn unreal_multiplayer() -> StructuredAnswer {
    StructuredAnswer {
        subtasks: strings(&[
            "Enable multiplayer plugins in Project Settings",
            "Create dedicated server build configuration",
            "Implement network replication for VR components",
            "Set up player state synchronization",
            "Test with multiple clients",
        ]),
        code_snippet: r#"// VRPlayerCharacter.cpp
#include "VRPlayerCharacter.h"
#include "Net/UnrealNetwork.h"

void AVRPlayerCharacter::GetLifetimeReplicatedProps(TArray<FLifetimeProperty>& OutLifetimeProps) const
{
    Super::GetLifetimeReplicatedProps(OutLifetimeProps);

    DOREPLIFETIME(AVRPlayerCharacter, HeadTransform);
    DOREPLIFETIME(AVRPlayerCharacter, LeftHandTransform);
    DOREPLIFETIME(AVRPlayerCharacter, RightHandTransform);
}

void AVRPlayerCharacter::ServerUpdateVRTransforms_Implementation(
    FTransform NewHeadTransform,
    FTransform NewLeftHand,
    FTransform NewRightHand)
{
    HeadTransform = NewHeadTransform;
    LeftHandTransform = NewLeftHand;
    RightHandTransform = NewRightHand;
}"#
        .to_string(),
        best_practices: strings(&[
            "Use compression for frequent VR transform updates",
            "Implement client-side prediction for smooth movement",
            "Consider network culling for distant players",
            "Handle VR-specific disconnection scenarios gracefully",
        ]),
        difficulty: Difficulty::Hard,
        documentation_links: strings(&[
            "https://docs.unrealengine.com/5.3/en-US/networking-and-multiplayer-in-unreal-engine/",
            "https://docs.unrealengine.com/5.3/en-US/vr-development-in-unreal-engine/",
        ]),
        estimated_time: "3-4 hours".to_string(),
    }
}

pub fn shader_occlusion() -> StructuredAnswer {
    StructuredAnswer {
        subtasks: strings(&[
            "Create occlusion shader using depth buffer comparison",
            "Implement proper depth testing for AR objects",
            "Add support for real-world geometry occlusion",
            "Optimize for mobile AR platforms",
            "Test with various lighting conditions",
        ]),
        code_snippet: r#"// AROcclusion.shader
Shader "Custom/AROcclusion"
{
    Properties
    {
        _MainTex ("Texture", 2D) = "white" {}
        _OcclusionStrength ("Occlusion Strength", Range(0,1)) = 1.0
    }

    SubShader
    {
        Tags { "RenderType"="Transparent" "Queue"="Geometry-1" }

        Pass
        {
            ZWrite On
            ZTest LEqual
            ColorMask 0

            CGPROGRAM
            #pragma vertex vert
            #pragma fragment frag

            struct appdata
            {
                float4 vertex : POSITION;
            };

            struct v2f
            {
                float4 vertex : SV_POSITION;
            };

            v2f vert (appdata v)
            {
                v2f o;
                o.vertex = UnityObjectToClipPos(v.vertex);
                return o;
            }

            fixed4 frag (v2f i) : SV_Target
            {
                return fixed4(0,0,0,0);
            }
            ENDCG
        }
    }
}"#
        .to_string(),
        best_practices: strings(&[
            "Use depth-only rendering for better performance",
            "Consider using stencil buffer for complex occlusion scenarios",
            "Test on target mobile devices for performance validation",
            "Implement fallback for devices without depth camera",
        ]),
        difficulty: Difficulty::Hard,
        documentation_links: strings(&[
            "https://docs.unity3d.com/Manual/SL-DepthTextures.html",
            "https://docs.unity3d.com/Packages/com.unity.xr.arfoundation@4.2/manual/occlusion-manager.html",
        ]),
        estimated_time: "2-3 hours".to_string(),
    }
}

/// Template answer with the category and the verbatim query filled in.
pub fn generic(query: &str, category: Category) -> StructuredAnswer {
    let lower = category.as_str().to_lowercase();
    StructuredAnswer {
        subtasks: vec![
            format!("Analyze the {category} development requirements for: {query}"),
            "Research relevant documentation and examples".to_string(),
            "Implement the core functionality step by step".to_string(),
            "Test and debug the implementation thoroughly".to_string(),
            "Optimize for your target platform and use case".to_string(),
        ],
        code_snippet: format!(
            r#"// {category} implementation for: {query}
// This is a generic template - provide more specific details for a complete solution

using UnityEngine;  // or appropriate includes for your platform

public class GeneratedSolution : MonoBehaviour
{{
    void Start()
    {{
        // Initialize your {lower} implementation here
        Debug.Log("Implementing: {query}");
    }}

    void Update()
    {{
        // Add your main logic here
    }}
}}"#
        ),
        best_practices: vec![
            format!("Follow {category}-specific development guidelines and conventions"),
            "Test on your target devices regularly during development".to_string(),
            "Keep performance optimization in mind from the start".to_string(),
            "Document your code for future reference and team collaboration".to_string(),
        ],
        difficulty: Difficulty::Medium,
        documentation_links: strings(&[
            "https://docs.unity3d.com/Manual/",
            "https://docs.unrealengine.com/",
            "https://developer.oculus.com/documentation/",
        ]),
        estimated_time: "1-3 hours".to_string(),
    }
}
